/// Core error types for Viking
use thiserror::Error;

/// Result type alias using `VikingError`
pub type Result<T> = std::result::Result<T, VikingError>;

/// Persistence failures as seen by the layers above storage
///
/// Lookups that find nothing are not errors at this level: stores return
/// `Option` and the caller decides what absence means.
#[derive(Error, Debug)]
pub enum VikingError {
    /// Duplicate entry (unique constraint)
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Stored data could not be read back
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl VikingError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for VikingError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => Self::Duplicate(db_err.to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}
