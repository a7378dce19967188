use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SnipzError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document parsed as JSON but its top level is not an array.
    #[error("Invalid snippet format: {0}")]
    Format(String),

    #[error("{0}")]
    Validation(String),

    #[error("Snippet not found: {0}")]
    SnippetNotFound(Uuid),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SnipzError>;
