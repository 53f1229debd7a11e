// --- File: crates/meetbook_common/src/models.rs ---

// Data structures shared by the availability engine, the gateway, the session machine and the
// reference API. The serde representation of these types is the wire format of the booking API.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Date format used on the wire (`yyyy-MM-dd`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque token identifying the booking scope of a session.
///
/// The token is never interpreted locally; it is only forwarded to the gateway. `Debug` output is
/// redacted so the value does not end up in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Day of the week, serialized with its full English name ("Monday").
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

/// One day of the offered calendar window.
///
/// `has_slots` is advisory: the slots are derived again when the date is selected, and a date
/// marked as open may still turn out to have none.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInfo {
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, format = Date, example = "2025-05-05")
    )]
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub has_slots: bool,
}

impl DateInfo {
    pub fn new(date: NaiveDate, has_slots: bool) -> Self {
        Self {
            date,
            day_of_week: date.weekday().into(),
            has_slots,
        }
    }
}

/// `HH:MM` (de)serialization for [`NaiveTime`] fields.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, FORMAT)
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A bookable one-hour interval. Slots have no identity beyond their bounds.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Length of every slot.
    pub fn length() -> Duration {
        Duration::hours(1)
    }

    /// The slot beginning at `start`, or `None` if it would run past midnight.
    pub fn starting_at(start: NaiveTime) -> Option<Self> {
        let (end, wrapped) = start.overflowing_add_signed(Self::length());
        (wrapped == 0).then_some(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(hhmm::FORMAT),
            self.end.format(hhmm::FORMAT)
        )
    }
}

/// Reasons a booking form is not ready to be submitted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,
    #[error("A valid email address is required")]
    InvalidEmail,
    #[error("Meeting title is required")]
    MissingTitle,
}

// `None` only if the pattern fails to compile; every email is then rejected.
pub(crate) static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// What the user typed into the booking form.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFormData {
    pub name: String,
    pub email: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BookingFormData {
    /// Trims every field; a blank description becomes `None`.
    pub fn normalized(self) -> Self {
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            title: self.title.trim().to_string(),
            description,
        }
    }

    /// Checks required-field presence and the email shape. Fields are checked in form order.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        let email = self.email.trim();
        if !EMAIL_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(email))
        {
            return Err(FormError::InvalidEmail);
        }
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        Ok(())
    }
}

/// Everything `createBooking` needs besides the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub form: BookingFormData,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    /// User id supplied by the host application, if any.
    pub external_user_id: Option<String>,
}

/// Outcome of `createBooking`. `booking_id` is present iff `success`, `error` iff not.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BookingResult {
    pub fn confirmed(booking_id: impl Into<String>) -> Self {
        Self {
            success: true,
            booking_id: Some(booking_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            booking_id: None,
            error: Some(error.into()),
        }
    }

    /// The booking id, only when the booking actually succeeded.
    pub fn confirmed_id(&self) -> Option<&str> {
        if self.success {
            self.booking_id.as_deref()
        } else {
            None
        }
    }
}
