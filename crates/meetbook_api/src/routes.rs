// --- File: crates/meetbook_api/src/routes.rs ---

use crate::handlers::{
    available_dates_handler, create_booking_handler, time_slots_handler,
    validate_token_body_handler, validate_token_query_handler, ApiState,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing every route of the booking API.
///
/// Paths are relative; the backend mounts the router both at `/` and under `/api`.
pub fn routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/validate-token",
            get(validate_token_query_handler).post(validate_token_body_handler),
        )
        .route("/available-dates", get(available_dates_handler))
        .route("/time-slots", get(time_slots_handler))
        .route("/create-booking", post(create_booking_handler))
        .with_state(state)
}
