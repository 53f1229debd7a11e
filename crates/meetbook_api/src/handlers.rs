// File: crates/meetbook_api/src/handlers.rs
use crate::store::BookingStore;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use meetbook_availability::{
    parse_iso_date, parse_time_zone, today_in, AvailabilityEngine, AvailabilityPolicy,
};
use meetbook_common::models::{hhmm, BookingFormData, BookingResult, TimeSlot};
use meetbook_common::wire::{
    CreateBookingPayload, DatesQuery, DatesResponse, SlotsQuery, SlotsResponse, TokenParams,
    ValidateTokenResponse,
};
use meetbook_common::{auth_error, validation_error, MeetbookError};
use meetbook_config::AppConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

pub const INVALID_TOKEN: &str = "Invalid token";
pub const DATE_REQUIRED: &str = "Date is required";
pub const INVALID_DATE_FORMAT: &str = "Invalid date format (YYYY-MM-DD)";
pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_DATE_OR_TIME: &str = "Invalid date or time";

// Shared state of the booking API handlers
pub struct ApiState {
    pub config: Arc<AppConfig>,
    pub engine: AvailabilityEngine,
    pub time_zone: Tz,
    pub store: BookingStore,
    valid_tokens: HashSet<String>,
    rng: Mutex<StdRng>,
}

impl ApiState {
    /// Builds the state from configuration; `api.seed` pins the generator.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, MeetbookError> {
        let rng = match config.api.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: Arc<AppConfig>, rng: StdRng) -> Result<Self, MeetbookError> {
        let policy = AvailabilityPolicy::from_config(&config.availability)?;
        let time_zone = parse_time_zone(&config.calendar.time_zone)?;
        let valid_tokens = config.api.valid_tokens.iter().cloned().collect();
        Ok(Self {
            config,
            engine: AvailabilityEngine::new(policy),
            time_zone,
            store: BookingStore::new(),
            valid_tokens,
            rng: Mutex::new(rng),
        })
    }

    pub fn is_valid_token(&self, token: Option<&str>) -> bool {
        token.is_some_and(|t| self.valid_tokens.contains(t))
    }

    fn require_token(&self, token: Option<&str>) -> Result<(), MeetbookError> {
        if self.is_valid_token(token) {
            Ok(())
        } else {
            Err(auth_error(INVALID_TOKEN))
        }
    }

    /// `days` as sent by the client: missing, malformed or non-positive values use the configured
    /// window; larger values are capped at `api.max_window_days`.
    pub fn window_days(&self, raw: Option<&str>) -> u32 {
        let fallback = self.config.availability.window_days;
        let requested = raw
            .and_then(|d| d.trim().parse::<i64>().ok())
            .filter(|d| *d > 0)
            .map(|d| u32::try_from(d).unwrap_or(u32::MAX))
            .unwrap_or(fallback);
        requested.min(self.config.api.max_window_days)
    }

    fn available_dates(&self, window_days: u32) -> DatesResponse {
        let today = today_in(self.time_zone);
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        DatesResponse {
            dates: self
                .engine
                .generate_available_dates(today, window_days, &mut *rng),
        }
    }

    fn time_slots(&self, date: NaiveDate) -> SlotsResponse {
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        SlotsResponse {
            slots: self.engine.generate_time_slots(date, &mut *rng),
        }
    }
}

// Treat blank strings like absent fields.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Handler to validate a token passed as a query parameter.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/validate-token",
    params(TokenParams),
    responses(
        (status = 200, description = "Whether the token is accepted", body = ValidateTokenResponse)
    ),
    tag = "Booking"
))]
pub async fn validate_token_query_handler(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<TokenParams>,
) -> Json<ValidateTokenResponse> {
    let valid = state.is_valid_token(params.token.as_deref());
    debug!("validate-token (query): valid={}", valid);
    Json(ValidateTokenResponse { valid })
}

/// Handler to validate a token passed in a JSON body.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/validate-token",
    request_body = TokenParams,
    responses(
        (status = 200, description = "Whether the token is accepted", body = ValidateTokenResponse)
    ),
    tag = "Booking"
))]
pub async fn validate_token_body_handler(
    State(state): State<Arc<ApiState>>,
    Json(params): Json<TokenParams>,
) -> Json<ValidateTokenResponse> {
    let valid = state.is_valid_token(params.token.as_deref());
    debug!("validate-token (body): valid={}", valid);
    Json(ValidateTokenResponse { valid })
}

/// Handler to list the dates of the booking window.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/available-dates",
    params(DatesQuery),
    responses(
        (status = 200, description = "One entry per day, starting today", body = DatesResponse),
        (status = 401, description = "Invalid token")
    ),
    tag = "Booking"
))]
pub async fn available_dates_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DatesQuery>,
) -> Result<Json<DatesResponse>, MeetbookError> {
    state.require_token(query.token.as_deref())?;
    let window_days = state.window_days(query.days.as_deref());
    Ok(Json(state.available_dates(window_days)))
}

/// Handler to list the offered slots of one date.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/time-slots",
    params(SlotsQuery),
    responses(
        (status = 200, description = "Offered one-hour slots, chronological", body = SlotsResponse),
        (status = 400, description = "Date missing or malformed"),
        (status = 401, description = "Invalid token")
    ),
    tag = "Booking"
))]
pub async fn time_slots_handler(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, MeetbookError> {
    state.require_token(query.token.as_deref())?;
    let raw_date = present(&query.date).ok_or_else(|| validation_error(DATE_REQUIRED))?;
    let date = parse_iso_date(raw_date).map_err(|_| validation_error(INVALID_DATE_FORMAT))?;
    Ok(Json(state.time_slots(date)))
}

/// Handler to create a booking.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/create-booking",
    request_body = CreateBookingPayload,
    responses(
        (status = 200, description = "Booking created", body = BookingResult,
         example = json!({ "success": true, "booking_id": "3f2a9c0e5b7d4e1f8a6b2c4d9e0f1a2b" })),
        (status = 400, description = "Missing or malformed fields", body = BookingResult,
         example = json!({ "success": false, "error": "Missing required fields" })),
        (status = 401, description = "Invalid token")
    ),
    tag = "Booking"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingPayload>,
) -> Response {
    if let Err(err) = state.require_token(payload.token.as_deref()) {
        return err.into_response();
    }

    let (
        Some(name),
        Some(email),
        Some(title),
        Some(raw_date),
        Some(raw_start),
        Some(raw_end),
    ) = (
        present(&payload.name),
        present(&payload.email),
        present(&payload.title),
        present(&payload.date),
        present(&payload.start_time),
        present(&payload.end_time),
    )
    else {
        return rejected(MISSING_FIELDS);
    };

    let parsed = (
        parse_iso_date(raw_date).ok(),
        hhmm::parse(raw_start).ok(),
        hhmm::parse(raw_end).ok(),
    );
    let (date, slot) = match parsed {
        (Some(date), Some(start), Some(end)) if end > start => (date, TimeSlot { start, end }),
        _ => return rejected(INVALID_DATE_OR_TIME),
    };

    let form = BookingFormData {
        name: name.to_string(),
        email: email.to_string(),
        title: title.to_string(),
        description: payload.description.clone(),
    }
    .normalized();
    let booking = state
        .store
        .record(form, date, slot, payload.telegram_id.clone());

    info!(
        "Booking created: id={}, date={}, slot={}, title={:?}",
        booking.id, booking.date, booking.slot, booking.form.title
    );
    Json(BookingResult::confirmed(booking.id)).into_response()
}

fn rejected(reason: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(BookingResult::failed(reason))).into_response()
}
