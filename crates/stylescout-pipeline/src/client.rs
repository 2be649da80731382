use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde_json::Value;
use std::env;
use std::time::Duration;

use stylescout_core::config::Config;
use stylescout_core::{PipelineError, Result};

use crate::backend::GenerativeBackend;
use crate::http::send_json;

/// Gemini `generateContent` client implementing both pipeline capabilities.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    vision_model: String,
    search_model: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            vision_model: stylescout_core::config::DEFAULT_VISION_MODEL.to_string(),
            search_model: stylescout_core::config::DEFAULT_SEARCH_MODEL.to_string(),
        }
    }

    /// Resolve the API key from the configured environment variable; a
    /// missing key fails here, before any network call.
    pub fn from_config(config: &Config, timeout_secs: u64) -> Result<Self> {
        let key_env = config.api_key_env();
        let api_key = env::var(key_env)
            .map_err(|_| PipelineError::Config(format!("missing env var {key_env}")))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            api_key,
            vision_model: config.vision_model().to_string(),
            search_model: config.search_model().to_string(),
        })
    }

    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = model.into();
        self
    }

    pub fn with_search_model(mut self, model: impl Into<String>) -> Self {
        self.search_model = model.into();
        self
    }

    async fn generate(&self, model: &str, body: Value) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        );
        let resp: Value = send_json(
            self.http
                .post(url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body),
        )
        .await?;
        Ok(extract_text(&resp))
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn vision_analyze(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {
                        "inline_data": {
                            "mime_type": mime_type,
                            "data": general_purpose::STANDARD.encode(image),
                        }
                    },
                    { "text": prompt },
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }
        });
        self.generate(&self.vision_model, body).await
    }

    async fn grounded_search(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "tools": [{ "googleSearch": {} }],
        });
        self.generate(&self.search_model, body).await
    }
}

/// Concatenate the text parts of the first candidate; absent candidates or
/// parts yield an empty string, which downstream extraction rejects.
fn extract_text(resp: &Value) -> String {
    let mut text = String::new();
    if let Some(parts) = resp
        .pointer("/candidates/0/content/parts")
        .and_then(|v| v.as_array())
    {
        for part in parts {
            if let Some(piece) = part.get("text").and_then(|v| v.as_str()) {
                text.push_str(piece);
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_text_concatenates_parts() {
        let resp = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] }
            }]
        });
        assert_eq!(extract_text(&resp), "{\"a\":1}");
    }

    #[test]
    fn extract_text_handles_missing_candidates() {
        assert_eq!(extract_text(&json!({})), "");
        assert_eq!(extract_text(&json!({"candidates": []})), "");
    }
}
