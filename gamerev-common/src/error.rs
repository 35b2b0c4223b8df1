//! Common error types for gamerev

use thiserror::Error;

/// Common result type for gamerev operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across gamerev crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested document not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid query parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Document failed schema validation
    #[error("{0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
