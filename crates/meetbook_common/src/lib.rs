// --- File: crates/meetbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Domain data structures shared by every crate
pub mod services; // Gateway abstraction
pub mod wire; // Request and response bodies of the booking API


// Re-export error types and utilities for easier access
pub use error::{auth_error, config_error, validation_error, HttpStatusCode, MeetbookError};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_result};

pub use models::{
    AccessToken, BookingFormData, BookingRequest, BookingResult, DateInfo, DayOfWeek, FormError,
    TimeSlot, ISO_DATE_FORMAT,
};
pub use services::BookingGateway;
pub use wire::{
    CreateBookingPayload, DatesQuery, DatesResponse, SlotsQuery, SlotsResponse, TokenParams,
    ValidateTokenResponse,
};
