//! Error types for the access gate
//!
//! None of these escape `AccessGate::attempt_access`; they are absorbed at the
//! gate boundary and turned into a state change or a user-facing message.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Gate errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration collaborator failed to answer
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notes collaborator failed to query or read
    #[error("Notes provider error: {0}")]
    Provider(String),

    /// Display sink rejected the records
    #[error("Display error: {0}")]
    Display(String),

    /// Stored secret is not a parseable hash string
    #[error("Invalid secret hash: {0}")]
    InvalidSecretHash(String),

    /// Another invocation currently holds the gate
    #[error("An access attempt is already in progress")]
    AttemptInProgress,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::Serialization(_) | Error::Io(_) => ErrorCategory::Config,
            Error::Provider(_) => ErrorCategory::Provider,
            Error::Display(_) => ErrorCategory::Display,
            Error::InvalidSecretHash(_) => ErrorCategory::Secret,
            Error::AttemptInProgress => ErrorCategory::Concurrency,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration lookup or loading
    Config,
    /// Notes data provider
    Provider,
    /// Display sink
    Display,
    /// Stored secret handling
    Secret,
    /// Overlapping invocations
    Concurrency,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Provider => write!(f, "Provider"),
            ErrorCategory::Display => write!(f, "Display"),
            ErrorCategory::Secret => write!(f, "Secret"),
            ErrorCategory::Concurrency => write!(f, "Concurrency"),
        }
    }
}
