//! Error types for the query cursor
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the query cursor
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Argument Errors
    // ============================================================================
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    #[error("Malformed query response: {message}")]
    MalformedResponse { message: String },

    #[error("Service rejected request with HTTP {status}: {body}")]
    ServiceRejected { status: u16, body: String },

    #[error("Failed to decode page: {message}")]
    Decode { message: String },

    // ============================================================================
    // Iteration Errors
    // ============================================================================
    #[error("No more elements in query result")]
    NoMoreElements,

    #[error("No query page has been fetched yet")]
    NoPage,

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a service rejection error
    pub fn service_rejected(status: u16, body: impl Into<String>) -> Self {
        Self::ServiceRejected {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Whether this error belongs to the I/O class of failures.
    ///
    /// Malformed responses are reported through the same class as transport
    /// failures: the exchange happened but produced nothing usable.
    pub fn is_io_class(&self) -> bool {
        matches!(
            self,
            Error::MalformedResponse { .. }
                | Error::Decode { .. }
                | Error::Http(_)
                | Error::Timeout { .. }
                | Error::Io(_)
        )
    }
}

/// Result type alias for the query cursor
pub type Result<T> = std::result::Result<T, Error>;
