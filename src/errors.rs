use thiserror::Error;

/// Error type covering validation, persistence, and authentication failures.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;

impl FinanceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FinanceError::InvalidInput(message.into())
    }
}
