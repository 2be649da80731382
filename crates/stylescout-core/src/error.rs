use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("no JSON object found in model output")]
    Extraction { raw: String },
    #[error("response does not match expected shape: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
