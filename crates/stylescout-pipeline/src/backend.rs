use async_trait::async_trait;
use serde_json::Value;
use stylescout_core::Result;

/// The two opaque model capabilities the pipeline consumes. Both may be slow,
/// malformed, or empty; callers must treat the returned text as untrusted.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// One vision request: image bytes plus instructions and a response
    /// schema the model is expected to conform to.
    async fn vision_analyze(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<String>;

    /// One grounded-search request; the reply may wrap JSON in prose or
    /// markdown fences.
    async fn grounded_search(&self, prompt: &str) -> Result<String>;
}
