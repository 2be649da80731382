use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::home_dir;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SEARCH_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub defaults: Defaults,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Defaults {
    pub vision_model: Option<String>,
    pub search_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeminiSettings {
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ConfigFile {
    defaults: Option<Defaults>,
    gemini: Option<GeminiSettings>,
}

impl Config {
    /// Merge config files from well-known locations; later files win per field.
    pub fn load() -> Result<Self> {
        let mut config = Config::default();
        for path in default_config_paths() {
            if path.exists() {
                config.merge(load_config_file(&path)?);
            }
        }
        Ok(config)
    }

    pub fn vision_model(&self) -> &str {
        self.defaults
            .vision_model
            .as_deref()
            .unwrap_or(DEFAULT_VISION_MODEL)
    }

    pub fn search_model(&self) -> &str {
        self.defaults
            .search_model
            .as_deref()
            .unwrap_or(DEFAULT_SEARCH_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.gemini.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key_env(&self) -> &str {
        self.gemini
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_ENV)
    }

    fn merge(&mut self, other: ConfigFile) {
        if let Some(defaults) = other.defaults {
            if defaults.vision_model.is_some() {
                self.defaults.vision_model = defaults.vision_model;
            }
            if defaults.search_model.is_some() {
                self.defaults.search_model = defaults.search_model;
            }
            if defaults.timeout_secs.is_some() {
                self.defaults.timeout_secs = defaults.timeout_secs;
            }
        }
        if let Some(gemini) = other.gemini {
            if gemini.base_url.is_some() {
                self.gemini.base_url = gemini.base_url;
            }
            if gemini.api_key_env.is_some() {
                self.gemini.api_key_env = gemini.api_key_env;
            }
        }
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let parsed: ConfigFile =
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    Ok(parsed)
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = home_dir() {
        paths.push(home.join(".stylescout/config.toml"));
        paths.push(home.join(".config/stylescout/config.toml"));
    }
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg).join("stylescout/config.toml"));
    }
    paths.push(PathBuf::from("./stylescout.toml"));
    if let Ok(custom) = env::var("STYLESCOUT_CONFIG_PATH") {
        paths.push(PathBuf::from(custom));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_unset_fields() {
        let config = Config::default();
        assert_eq!(config.vision_model(), DEFAULT_VISION_MODEL);
        assert_eq!(config.search_model(), DEFAULT_SEARCH_MODEL);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api_key_env(), "GEMINI_API_KEY");
    }

    #[test]
    fn merge_overrides_per_field() {
        let mut config = Config::default();
        let file: ConfigFile = toml::from_str(
            r#"
            [defaults]
            vision_model = "gemini-2.5-pro"

            [gemini]
            base_url = "https://example.test/v1beta"
            "#,
        )
        .unwrap();
        config.merge(file);
        assert_eq!(config.vision_model(), "gemini-2.5-pro");
        assert_eq!(config.search_model(), DEFAULT_SEARCH_MODEL);
        assert_eq!(config.base_url(), "https://example.test/v1beta");
    }
}
