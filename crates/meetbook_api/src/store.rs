// --- File: crates/meetbook_api/src/store.rs ---
use chrono::{DateTime, NaiveDate, Utc};
use meetbook_common::models::{BookingFormData, TimeSlot};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// A booking accepted by the reference backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredBooking {
    pub id: String,
    pub form: BookingFormData,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub external_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Process-local booking log. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct BookingStore {
    bookings: Mutex<Vec<StoredBooking>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a booking and returns its freshly assigned id.
    pub fn record(
        &self,
        form: BookingFormData,
        date: NaiveDate,
        slot: TimeSlot,
        external_user_id: Option<String>,
    ) -> StoredBooking {
        let booking = StoredBooking {
            id: Uuid::new_v4().simple().to_string(),
            form,
            date,
            slot,
            external_user_id,
            created_at: Utc::now(),
        };
        self.lock().push(booking.clone());
        booking
    }

    pub fn get(&self, id: &str) -> Option<StoredBooking> {
        self.lock().iter().find(|b| b.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Only whole bookings are pushed, so a poisoned vector is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<StoredBooking>> {
        self.bookings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
