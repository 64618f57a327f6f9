//! Unified error handling for the wordstart crate
//!
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum used across module boundaries
//!
//! Every error maps to an HTTP status through [`Error::status_code`]; the
//! server layer turns that into a structured JSON body.

use axum::http::StatusCode;
use thiserror::Error;

pub use crate::config::ConfigError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or malformed caller input
    Validation,
    /// Faults raised while generating or formatting results
    Internal,
    /// Configuration and startup errors
    Config,
}

/// Unified error type for the wordstart crate
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied missing or empty input
    #[error("{0}")]
    Validation(String),

    /// Generation or formatting fault
    #[error("{0}")]
    Internal(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Config(_) => ErrorCategory::Config,
            Self::Internal(_) | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status reported to API callers
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Internal | ErrorCategory::Config => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
