// --- File: crates/meetbook_availability/src/lib.rs ---
// Declare modules within this crate
pub mod logic;
#[cfg(test)]
mod logic_proptest;

pub use logic::{
    parse_iso_date, parse_time_zone, today_in, AvailabilityEngine, AvailabilityError,
    AvailabilityPolicy, DEFAULT_WINDOW_DAYS,
};
