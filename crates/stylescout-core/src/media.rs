use base64::{engine::general_purpose, Engine as _};
use mime_guess::MimeGuess;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// An image payload on its way to the vision model. Only `image/*` MIME types
/// are accepted; everything else is rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub path: PathBuf,
    pub mime_type: String,
    pub size_bytes: Option<u64>,
}

impl ImageInput {
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_path_with_mime(path, None)
    }

    pub fn from_path_with_mime(path: &Path, mime_override: Option<&str>) -> Result<Self> {
        let mime = match mime_override {
            Some(mime) => mime.to_string(),
            None => MimeGuess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };
        if !mime.starts_with("image/") {
            return Err(PipelineError::Config(format!(
                "unsupported image mime type: {mime}"
            )));
        }
        let size_bytes = fs::metadata(path).ok().map(|m| m.len());
        Ok(Self {
            path: path.to_path_buf(),
            mime_type: mime,
            size_bytes,
        })
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.path)
            .map_err(|e| PipelineError::Config(format!("read {}: {e}", self.path.display())))
    }

    pub fn to_base64(&self) -> Result<String> {
        Ok(general_purpose::STANDARD.encode(self.read_bytes()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(ext: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("stylescout_media_test_{nanos}.{ext}"))
    }

    #[test]
    fn image_input_from_png_path() {
        let path = temp_path("png");
        fs::write(&path, [0u8, 1, 2, 3]).unwrap();
        let input = ImageInput::from_path(&path).unwrap();
        assert_eq!(input.mime_type, "image/png");
        assert_eq!(input.size_bytes, Some(4));
        assert_eq!(input.to_base64().unwrap(), "AAECAw==");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn non_image_mime_is_rejected() {
        let path = temp_path("mp4");
        let err = ImageInput::from_path(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn mime_override_wins_over_extension() {
        let path = temp_path("bin");
        let input = ImageInput::from_path_with_mime(&path, Some("image/webp")).unwrap();
        assert_eq!(input.mime_type, "image/webp");
    }
}
