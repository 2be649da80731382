use serde_json::Value;
use stylescout_core::extract::extract_json;
use stylescout_core::{AnalysisResult, PipelineError, Result};

use crate::backend::GenerativeBackend;

pub(crate) const VISION_PROMPT: &str = "Analyze this image and identify all clothing items visible. For each item, provide:\n\
1. A detailed description of the item (style, color, material, brand if visible)\n\
2. Estimated price range\n\
3. Search terms that would help find this exact item online\n\n\
Return the response in JSON format.";

/// Gemini response schema for the analysis shape, declared per request so the
/// model emits conformant JSON directly. Extraction stays tolerant anyway.
pub fn analysis_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "color": { "type": "STRING" },
                        "style": { "type": "STRING" },
                        "estimatedPrice": { "type": "STRING" },
                        "searchTerms": { "type": "STRING" }
                    },
                    "required": [
                        "name",
                        "description",
                        "color",
                        "style",
                        "estimatedPrice",
                        "searchTerms"
                    ]
                }
            },
            "overallStyle": { "type": "STRING" }
        },
        "required": ["items", "overallStyle"]
    })
}

/// One vision call, no internal retry. Zero detected items is a valid result;
/// unparseable or schema-violating output is an error for the whole run.
pub async fn analyze_image(
    backend: &dyn GenerativeBackend,
    image: &[u8],
    mime_type: &str,
) -> Result<AnalysisResult> {
    if !mime_type.starts_with("image/") {
        return Err(PipelineError::Config(format!(
            "unsupported image mime type: {mime_type}"
        )));
    }
    let text = backend
        .vision_analyze(image, mime_type, VISION_PROMPT, &analysis_schema())
        .await?;
    let value = extract_json(&text)?;
    serde_json::from_value(value).map_err(|e| PipelineError::Schema(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_all_item_fields() {
        let schema = analysis_schema();
        let required = schema
            .pointer("/properties/items/items/required")
            .and_then(|v| v.as_array())
            .unwrap();
        assert_eq!(required.len(), 6);
        assert!(required.iter().any(|v| v == "searchTerms"));
    }
}
