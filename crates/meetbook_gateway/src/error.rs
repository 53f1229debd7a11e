// --- File: crates/meetbook_gateway/src/error.rs ---
use meetbook_common::MeetbookError;
use thiserror::Error;

/// Errors that can occur when talking to the booking backend.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport failure, timeout or undecodable body
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the token
    #[error("Access token rejected by the booking service")]
    Unauthorized,

    /// Any other non-success status
    #[error("Booking service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Missing or unusable gateway configuration
    #[error("Gateway configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Request(e) if e.is_timeout())
    }
}

impl From<GatewayError> for MeetbookError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Request(e) => e.into(),
            GatewayError::Unauthorized => MeetbookError::AuthError(err.to_string()),
            GatewayError::Status { .. } => MeetbookError::HttpError(err.to_string()),
            GatewayError::Config(message) => MeetbookError::ConfigError(message),
        }
    }
}
