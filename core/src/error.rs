use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Invalid token: {token:?}")]
    InvalidToken { token: String },

    #[error("No complaint found for token {token}")]
    NotFound { token: String },

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Invalid submission: {reason}")]
    InvalidSubmission { reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PortalResult<T> = Result<T, PortalError>;
