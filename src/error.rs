// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing input file: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("Embedding model could not be loaded: {0}")]
    ModelLoad(String),

    #[error("Text extraction failed for {}: {message}", path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("Ranking failed: {0}")]
    Ranking(String),

    #[error("File operation failed for {}: {source}", path.display())]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}
