// --- File: crates/meetbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by the Meetbook crates.
///
/// Crates with their own error enums convert into this type at HTTP boundaries.
#[derive(Error, Debug)]
pub enum MeetbookError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The access token was missing or rejected
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl MeetbookError {
    /// The message without the category prefix, as shown to API clients.
    pub fn public_message(&self) -> &str {
        match self {
            MeetbookError::HttpError(message)
            | MeetbookError::ParseError(message)
            | MeetbookError::ConfigError(message)
            | MeetbookError::AuthError(message)
            | MeetbookError::ValidationError(message)
            | MeetbookError::TimeoutError(message)
            | MeetbookError::InternalError(message) => message,
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for MeetbookError {
    fn status_code(&self) -> u16 {
        match self {
            MeetbookError::HttpError(_) => 502,
            MeetbookError::ParseError(_) => 400,
            MeetbookError::ConfigError(_) => 500,
            MeetbookError::AuthError(_) => 401,
            MeetbookError::ValidationError(_) => 400,
            MeetbookError::TimeoutError(_) => 504,
            MeetbookError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for MeetbookError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MeetbookError::TimeoutError(err.to_string())
        } else {
            MeetbookError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MeetbookError {
    fn from(err: serde_json::Error) -> Self {
        MeetbookError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for MeetbookError {
    fn from(err: std::io::Error) -> Self {
        MeetbookError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> MeetbookError {
    MeetbookError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> MeetbookError {
    MeetbookError::ValidationError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> MeetbookError {
    MeetbookError::AuthError(message.to_string())
}
