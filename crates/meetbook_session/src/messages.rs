// --- File: crates/meetbook_session/src/messages.rs ---

// User-facing texts for session error codes. Presentation shells look messages up here instead of
// hard-coding them.

use crate::state::ErrorCode;

pub const DEFAULT_MESSAGE: &str = "An error occurred";

pub static ERROR_MESSAGES: &[(ErrorCode, &str)] = &[
    (ErrorCode::NoToken, "No booking token provided"),
    (ErrorCode::InvalidToken, "Invalid or expired booking link"),
    (ErrorCode::NoSlots, "No available time slots for the selected date"),
    (ErrorCode::MissingInfo, "Missing booking information"),
    (ErrorCode::BookingFailed, "Failed to create booking"),
    (ErrorCode::Default, DEFAULT_MESSAGE),
];

pub fn message_for(code: ErrorCode) -> &'static str {
    ERROR_MESSAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, message)| *message)
        .unwrap_or(DEFAULT_MESSAGE)
}
