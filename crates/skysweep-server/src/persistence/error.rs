//! Error type for flight log storage.

use skysweep_core::ValidationError;
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The log was rejected before anything was written.
    #[error("invalid flight log: {0}")]
    Validation(#[from] ValidationError),

    /// The database could not be reached or refused the operation.
    #[error("flight log store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// A stored row no longer decodes into a flight log.
    #[error("stored flight log {id} is corrupt: {message}")]
    Corrupt { id: String, message: String },

    #[error("failed to encode flight log: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
