// --- File: crates/meetbook_session/src/error.rs ---
use meetbook_common::models::{FormError, TimeSlot};
use thiserror::Error;

use crate::state::StepKind;

/// Misuse of the session by the presentation shell. The session itself is left unchanged.
///
/// Gateway failures never surface here; they become [`ErrorCode`](crate::state::ErrorCode)s in
/// the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("'{action}' is not allowed in step {step}")]
    InvalidTransition { action: &'static str, step: StepKind },

    #[error("Slot {0} is not offered for the selected date")]
    UnknownSlot(TimeSlot),

    #[error("Booking form incomplete: {0}")]
    InvalidForm(#[from] FormError),

    #[error("A booking is already being submitted")]
    SubmitInFlight,
}
