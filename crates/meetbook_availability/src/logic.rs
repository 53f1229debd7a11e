// --- File: crates/meetbook_availability/src/logic.rs ---
use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use meetbook_common::models::{hhmm, DateInfo, DayOfWeek, TimeSlot, ISO_DATE_FORMAT};
use meetbook_common::{config_error, validation_error, MeetbookError};
use meetbook_config::AvailabilityConfig;
use rand::Rng;
use std::str::FromStr;
use tracing::debug;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AvailabilityError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Invalid availability policy: {0}")]
    InvalidPolicy(String),
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
}

/// Number of days offered when the caller does not ask for a specific window.
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// Working window and open/closed probabilities used to simulate availability.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityPolicy {
    work_start: NaiveTime,
    work_end: NaiveTime,
    weekday_open_probability: f64,
    weekend_open_probability: f64,
    slot_open_probability: f64,
}

impl AvailabilityPolicy {
    pub fn new(
        work_start: NaiveTime,
        work_end: NaiveTime,
        weekday_open_probability: f64,
        weekend_open_probability: f64,
        slot_open_probability: f64,
    ) -> Result<Self, AvailabilityError> {
        if work_end <= work_start {
            return Err(AvailabilityError::InvalidPolicy(format!(
                "working window {} - {} is empty",
                work_start.format(hhmm::FORMAT),
                work_end.format(hhmm::FORMAT)
            )));
        }
        for (name, p) in [
            ("weekday_open_probability", weekday_open_probability),
            ("weekend_open_probability", weekend_open_probability),
            ("slot_open_probability", slot_open_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AvailabilityError::InvalidPolicy(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(Self {
            work_start,
            work_end,
            weekday_open_probability,
            weekend_open_probability,
            slot_open_probability,
        })
    }

    pub fn from_config(config: &AvailabilityConfig) -> Result<Self, AvailabilityError> {
        let work_start = hhmm::parse(&config.work_start)
            .map_err(|_| AvailabilityError::InvalidTime(config.work_start.clone()))?;
        let work_end = hhmm::parse(&config.work_end)
            .map_err(|_| AvailabilityError::InvalidTime(config.work_end.clone()))?;
        Self::new(
            work_start,
            work_end,
            config.weekday_open_probability,
            config.weekend_open_probability,
            config.slot_open_probability,
        )
    }

    pub fn work_start(&self) -> NaiveTime {
        self.work_start
    }

    pub fn work_end(&self) -> NaiveTime {
        self.work_end
    }

    /// Probability that a date is advertised as having slots.
    pub fn open_probability(&self, day: DayOfWeek) -> f64 {
        if day.is_weekend() {
            self.weekend_open_probability
        } else {
            self.weekday_open_probability
        }
    }

    /// Every one-hour slot that fits completely inside the working window, in order.
    pub fn candidate_slots(&self) -> Vec<TimeSlot> {
        let mut candidates = Vec::new();
        let mut cursor = self.work_start;
        while let Some(slot) = TimeSlot::starting_at(cursor) {
            if slot.end > self.work_end {
                break;
            }
            candidates.push(slot);
            cursor = slot.end;
        }
        candidates
    }
}

impl Default for AvailabilityPolicy {
    /// 09:00 - 17:00; weekdays open 70% of the time, weekends 30%, each slot 70%.
    fn default() -> Self {
        Self {
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            work_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            weekday_open_probability: 0.7,
            weekend_open_probability: 0.3,
            slot_open_probability: 0.7,
        }
    }
}

/// Decides which dates and which slots are offered.
///
/// The engine holds no state besides its policy. Randomness is supplied by the caller so the
/// outcome can be pinned with a seeded generator.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityEngine {
    policy: AvailabilityPolicy,
}

impl AvailabilityEngine {
    pub fn new(policy: AvailabilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AvailabilityPolicy {
        &self.policy
    }

    /// One entry per day of `today .. today + window_days`, in chronological order.
    ///
    /// Each day gets an independent draw deciding `has_slots`; closed days are kept in the output
    /// with `has_slots = false`.
    pub fn generate_available_dates<R: Rng + ?Sized>(
        &self,
        today: NaiveDate,
        window_days: u32,
        rng: &mut R,
    ) -> Vec<DateInfo> {
        debug!(
            "Generating availability for {} day(s) starting {}",
            window_days, today
        );
        today
            .iter_days()
            .take(window_days as usize)
            .map(|date| {
                let day: DayOfWeek = date.weekday().into();
                let has_slots = rng.gen_bool(self.policy.open_probability(day));
                DateInfo::new(date, has_slots)
            })
            .collect()
    }

    /// The offered slots of `date`, in chronological order.
    ///
    /// Weekends never have slots. On weekdays each candidate slot is kept by an independent draw,
    /// so the result may be empty. Only the weekday matters; the date is not checked against any
    /// window.
    pub fn generate_time_slots<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        rng: &mut R,
    ) -> Vec<TimeSlot> {
        let day: DayOfWeek = date.weekday().into();
        if day.is_weekend() {
            debug!("{} is a {}, no slots offered", date, day);
            return Vec::new();
        }

        let slots: Vec<TimeSlot> = self
            .policy
            .candidate_slots()
            .into_iter()
            .filter(|_| rng.gen_bool(self.policy.slot_open_probability))
            .collect();
        debug!("{} slot(s) offered on {}", slots.len(), date);
        slots
    }
}

/// Parses a `yyyy-MM-dd` calendar date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, AvailabilityError> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT)
        .map_err(|_| AvailabilityError::InvalidDate(raw.to_string()))
}

/// Parses an IANA time zone name such as `Europe/Zurich`.
pub fn parse_time_zone(name: &str) -> Result<Tz, AvailabilityError> {
    Tz::from_str(name).map_err(|_| AvailabilityError::UnknownTimeZone(name.to_string()))
}

/// The current calendar date in `time_zone`.
pub fn today_in(time_zone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&time_zone).date_naive()
}

impl From<AvailabilityError> for MeetbookError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::InvalidDate(_) => validation_error(err),
            AvailabilityError::InvalidTime(_)
            | AvailabilityError::InvalidPolicy(_)
            | AvailabilityError::UnknownTimeZone(_) => config_error(err),
        }
    }
}
