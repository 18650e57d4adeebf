#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("booking file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("speech error: {0}")]
    Speech(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
