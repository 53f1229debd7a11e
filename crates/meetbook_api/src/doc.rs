// File: crates/meetbook_api/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use meetbook_common::models::{BookingResult, DateInfo, DayOfWeek, TimeSlot};
use meetbook_common::wire::{
    CreateBookingPayload, DatesResponse, SlotsResponse, TokenParams, ValidateTokenResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::validate_token_query_handler,
        crate::handlers::validate_token_body_handler,
        crate::handlers::available_dates_handler,
        crate::handlers::time_slots_handler,
        crate::handlers::create_booking_handler
    ),
    components(
        schemas(
            TokenParams,
            ValidateTokenResponse,
            DateInfo,
            DayOfWeek,
            DatesResponse,
            TimeSlot,
            SlotsResponse,
            CreateBookingPayload,
            BookingResult
        )
    ),
    tags(
        (name = "Booking", description = "Availability and booking API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct BookingApiDoc;
