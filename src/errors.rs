use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForestError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Invalid forest payload in {path}: {source}")]
    InvalidPayload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize forest: {0}")]
    SerializeError(#[source] serde_json::Error),
}

pub type ForestResult<T> = Result<T, ForestError>;
