use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("Decompression error: {0}")]
    DecompressionError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// True for failures raised while decoding a stored stream
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::DecompressionError(_))
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
