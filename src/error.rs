use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("File Format Error: {0}")]
    FileFormat(String),
}

pub type TfResult<T> = Result<T, TransForgeError>;
