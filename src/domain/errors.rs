//! Domain error types
//!
//! This module defines the error hierarchy for Sluice.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Sluice error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum SluiceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Sailthru API returned a non-success response
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network/connection errors talking to Sailthru
    #[error("Connection error: {0}")]
    Connection(String),

    /// A successful response was missing something we need
    #[error("Invalid response from Sailthru: {0}")]
    InvalidResponse(String),

    /// Export job did not complete within the polling budget
    #[error("Export job {job_id} did not complete after {attempts} status checks")]
    JobTimedOut { job_id: String, attempts: usize },

    /// A campaign record's start_time did not match the provider format
    #[error("Timestamp parse error: {0}")]
    Timestamp(String),

    /// BigQuery load failures
    #[error("Warehouse load error: {0}")]
    Warehouse(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Non-success response from the Sailthru API
///
/// Carries the HTTP status, the provider's numeric error code (when the body
/// had one) and the provider's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Sailthru API returned {status}, error code {}: {message}",
    display_code(.code)
)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,

    /// Sailthru error code (`error` field of the body)
    pub code: Option<i64>,

    /// Human-readable message (`errormsg` field, or the raw body)
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: u16, code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

fn display_code(code: &Option<i64>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl From<std::io::Error> for SluiceError {
    fn from(err: std::io::Error) -> Self {
        SluiceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SluiceError {
    fn from(err: serde_json::Error) -> Self {
        SluiceError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SluiceError {
    fn from(err: toml::de::Error) -> Self {
        SluiceError::Configuration(format!("TOML parse error: {err}"))
    }
}
