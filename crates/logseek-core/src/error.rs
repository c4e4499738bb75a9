//! Error types for the logseek client.
//!
//! One unified error type with explicit variants so callers can handle
//! specific failure modes; all of them are expected-input errors except
//! `Transport`, which wraps whatever the HTTP layer reports.

use std::fmt;
use thiserror::Error;

/// The unified error type for logseek operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid local setup (credentials, selected repository).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network transport failures (DNS, TLS, connection, timeout).
    #[error("transport error: {message}")]
    Transport {
        /// Description from the underlying HTTP client.
        message: String,
    },

    /// Authentication rejected by the service.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Error response from the remote service.
    #[error("remote service error: {0}")]
    Remote(#[from] ServiceError),

    /// Unknown repository or field.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation used outside its valid state (e.g. scroll without a token).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Request identifier that does not decode to the expected 12 bytes.
    #[error("malformed request id: {0}")]
    MalformedReqid(String),

    /// Date string matching none of the accepted layouts.
    #[error("unrecognized time format: {0}")]
    TimeParse(String),
}

/// Error payload returned by the remote service.
#[derive(Debug)]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Service error code (if present).
    pub error: Option<String>,
    /// Error message from the service.
    pub message: Option<String>,
}

impl ServiceError {
    /// Create a new service error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}
