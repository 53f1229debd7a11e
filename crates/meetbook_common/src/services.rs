// --- File: crates/meetbook_common/src/services.rs ---
//! Service abstractions for the booking backend.
//!
//! The session machine only talks to the booking backend through [`BookingGateway`]. This keeps
//! the machine independent of the transport and lets tests substitute scripted gateways.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{AccessToken, BookingRequest, BookingResult, DateInfo, TimeSlot};

/// The four operations a booking session needs from the remote booking service.
///
/// Each operation distinguishes "resolved with data" (`Ok`, possibly empty) from
/// "resolved with failure" (`Err`).
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Error type returned by gateway operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Checks whether the token grants access to a booking scope.
    async fn validate(&self, token: &AccessToken) -> Result<bool, Self::Error>;

    /// Lists the dates of the offered window.
    ///
    /// Implementations report transport failures as an empty list rather than an error.
    async fn list_dates(&self, token: &AccessToken) -> Result<Vec<DateInfo>, Self::Error>;

    /// Lists the offered slots of one date, in chronological order.
    async fn list_slots(
        &self,
        token: &AccessToken,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, Self::Error>;

    /// Submits a booking.
    async fn create_booking(
        &self,
        token: &AccessToken,
        request: &BookingRequest,
    ) -> Result<BookingResult, Self::Error>;
}
