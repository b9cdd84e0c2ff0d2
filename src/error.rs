//! Error types for the Gophermart client.
//!
//! These cover process-level plumbing only. Failures reported by the remote
//! service are folded into [`crate::api::ApiResponse`] values instead.

use thiserror::Error;

/// The main error type for the client.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend could not be reached
    #[error("Network error: {0}")]
    Network(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// The underlying message, without the category prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Io(e) => e.to_string(),
            Self::Http(e) => e.to_string(),
            Self::Config(msg) | Self::Network(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Network(e.to_string())
        } else {
            Self::Http(e)
        }
    }
}
