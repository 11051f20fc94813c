use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the core services.
///
/// Business-rule rejections (`Validation`, `InvalidOperation`) carry the
/// user-facing message and leave state untouched. `NoActiveProfile` is a
/// defensive guard the boundary treats as a no-op rather than an error
/// dialog.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No active profile selected")]
    NoActiveProfile,
    #[error("Profile not found: {0}")]
    ProfileNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
}

pub type CoreResult<T> = StdResult<T, CoreError>;

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
