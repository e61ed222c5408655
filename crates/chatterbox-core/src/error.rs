//! Shared error type across chatterbox crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Unknown endpoint or resource.
    NotFound,
    /// Target connection is not registered.
    NotConnected,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::NotConnected => "NOT_CONNECTED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ChatterboxError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum ChatterboxError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("connection {0} is not connected")]
    NotConnected(u64),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl ChatterboxError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ChatterboxError::BadRequest(_) => ClientCode::BadRequest,
            ChatterboxError::NotFound(_) => ClientCode::NotFound,
            ChatterboxError::NotConnected(_) => ClientCode::NotConnected,
            ChatterboxError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            ChatterboxError::Internal(_) => ClientCode::Internal,
        }
    }
}
