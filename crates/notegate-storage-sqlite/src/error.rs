//! Error types

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Gate-level error (PIN hashing, configuration)
    #[error(transparent)]
    Core(#[from] notegate_core::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
