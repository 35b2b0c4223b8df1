//! Client error types

use thiserror::Error;

/// Errors returned by [`crate::ApiClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL that cannot carry API paths
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            ClientError::InvalidUrl(_) => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
