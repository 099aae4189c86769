/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Stored value could not be mapped back to a domain type
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                Self::Duplicate(db_err.message().to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for viking_core::VikingError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(msg) => Self::Duplicate(msg),
            StorageError::SerializationError(msg) => Self::storage(msg),
            StorageError::Database(e) => Self::Database(e.to_string()),
        }
    }
}
