//! Error types for Bookshelf Core

use crate::types::FieldErrors;
use thiserror::Error;

/// Result type alias using BookshelfError
pub type Result<T> = std::result::Result<T, BookshelfError>;

/// Top-level error type for all Bookshelf operations
#[derive(Debug, Error)]
pub enum BookshelfError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl BookshelfError {
    /// Per-field messages, either from local form validation or from a
    /// backend 400 response.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Gateway(GatewayError::RequestRejected { field_errors, .. }) => {
                field_errors.as_ref()
            }
            _ => None,
        }
    }

    /// HTTP status of a rejected request, if that is what failed
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Gateway(GatewayError::RequestRejected { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while talking to the backend
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure, no response was received
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The token-issuing endpoint failed, or answered without setting the cookie
    #[error("CSRF token unavailable (token endpoint answered {status})")]
    TokenUnavailable { status: u16 },

    /// The backend answered with a non-2xx status
    #[error("Request rejected with status {status}")]
    RequestRejected {
        status: u16,
        /// Present only for 400 responses whose body is a JSON object
        field_errors: Option<FieldErrors>,
        body: String,
    },

    #[error("Invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Errors in client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid backend URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(String),

    #[error("Could not determine a data directory for the session file")]
    NoDataDir,
}

/// Errors while loading or saving the persisted session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session file: {0}")]
    Format(#[from] serde_json::Error),
}
