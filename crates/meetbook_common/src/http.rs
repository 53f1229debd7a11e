// --- File: crates/meetbook_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, MeetbookError};

// Include the client module
pub mod client;

/// Extension trait for MeetbookError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for MeetbookError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // The booking API reports errors as a flat `{"error": "..."}` object
        let body = Json(json!({ "error": self.public_message() }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for MeetbookError to make it easier to use in Axum handlers.
impl IntoResponse for MeetbookError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
