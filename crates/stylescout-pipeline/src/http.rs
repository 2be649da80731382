use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use stylescout_core::{PipelineError, Result};

pub async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let resp = req
        .send()
        .await
        .map_err(|e| PipelineError::Transport(e.to_string()))?;
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| PipelineError::Transport(e.to_string()))?;
    if !status.is_success() {
        let excerpt = text.lines().take(20).collect::<Vec<_>>().join("\n");
        return Err(PipelineError::Transport(format!(
            "http {}: {}",
            status.as_u16(),
            excerpt
        )));
    }
    serde_json::from_str(&text).map_err(|e| PipelineError::Transport(e.to_string()))
}
