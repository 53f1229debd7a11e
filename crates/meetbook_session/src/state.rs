// --- File: crates/meetbook_session/src/state.rs ---

use chrono::NaiveDate;
use meetbook_common::models::{AccessToken, BookingFormData, DateInfo, TimeSlot};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::messages;

/// Why a session ended in the error step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NoToken,
    InvalidToken,
    NoSlots,
    MissingInfo,
    BookingFailed,
    /// Unexpected transport failure or timeout.
    Default,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NoToken => "no_token",
            ErrorCode::InvalidToken => "invalid_token",
            ErrorCode::NoSlots => "no_slots",
            ErrorCode::MissingInfo => "missing_info",
            ErrorCode::BookingFailed => "booking_failed",
            ErrorCode::Default => "default",
        }
    }

    /// The text shown to the user for this code.
    pub fn message(self) -> &'static str {
        messages::message_for(self)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the user is in the booking flow. Each variant carries exactly the data valid in it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookingStep {
    #[default]
    Loading,
    SelectDate {
        dates: Vec<DateInfo>,
    },
    SelectTime {
        dates: Vec<DateInfo>,
        date: NaiveDate,
        slots: Vec<TimeSlot>,
    },
    FillForm {
        dates: Vec<DateInfo>,
        date: NaiveDate,
        slots: Vec<TimeSlot>,
        slot: TimeSlot,
    },
    /// Terminal hand-off: the booking was created.
    Confirmed {
        booking_id: String,
    },
    Error(ErrorCode),
}

/// Data-less tag of a [`BookingStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Loading,
    SelectDate,
    SelectTime,
    FillForm,
    Confirmed,
    Error,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Loading => "loading",
            StepKind::SelectDate => "select_date",
            StepKind::SelectTime => "select_time",
            StepKind::FillForm => "fill_form",
            StepKind::Confirmed => "confirmed",
            StepKind::Error => "error",
        };
        f.write_str(name)
    }
}

impl BookingStep {
    pub fn kind(&self) -> StepKind {
        match self {
            BookingStep::Loading => StepKind::Loading,
            BookingStep::SelectDate { .. } => StepKind::SelectDate,
            BookingStep::SelectTime { .. } => StepKind::SelectTime,
            BookingStep::FillForm { .. } => StepKind::FillForm,
            BookingStep::Confirmed { .. } => StepKind::Confirmed,
            BookingStep::Error(_) => StepKind::Error,
        }
    }

    /// The offered dates, empty outside the selection steps.
    pub fn dates(&self) -> &[DateInfo] {
        match self {
            BookingStep::SelectDate { dates }
            | BookingStep::SelectTime { dates, .. }
            | BookingStep::FillForm { dates, .. } => dates,
            _ => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStep::Confirmed { .. } | BookingStep::Error(_))
    }
}

/// Complete state of one booking interaction. Every transition replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingSession {
    pub token: Option<AccessToken>,
    /// User id supplied by the host application, forwarded with the booking.
    pub external_user_id: Option<String>,
    pub step: BookingStep,
    pub form_data: BookingFormData,
    /// Date whose slots are being fetched.
    pub pending_date: Option<NaiveDate>,
}

impl BookingSession {
    pub fn available_dates(&self) -> &[DateInfo] {
        self.step.dates()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match &self.step {
            BookingStep::SelectTime { date, .. } | BookingStep::FillForm { date, .. } => {
                Some(*date)
            }
            _ => None,
        }
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        match &self.step {
            BookingStep::SelectTime { slots, .. } | BookingStep::FillForm { slots, .. } => slots,
            _ => &[],
        }
    }

    pub fn selected_slot(&self) -> Option<TimeSlot> {
        match &self.step {
            BookingStep::FillForm { slot, .. } => Some(*slot),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match &self.step {
            BookingStep::Error(code) => Some(*code),
            _ => None,
        }
    }

    pub fn booking_id(&self) -> Option<&str> {
        match &self.step {
            BookingStep::Confirmed { booking_id } => Some(booking_id),
            _ => None,
        }
    }

    /// User-facing error text of the current step, if it is an error.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error_code().map(ErrorCode::message)
    }
}
