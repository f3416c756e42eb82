use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("unbalanced container stack in '{file}': {depth} container(s) still open")]
    UnbalancedTraversal { file: String, depth: usize },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ArchscopeError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ArchscopeError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArchscopeError>;
