//! The booking session state machine.
//!
//! [`BookingSessionMachine`] walks one user through token validation, date selection, time
//! selection and form submission. Gateway failures are converted into [`ErrorCode`]s inside the
//! session; misuse by the caller is reported as [`SessionError`] and leaves the session untouched.
//!
//! Methods take `&self`, so a shell may run overlapping actions (for example picking a second
//! date while the slots of the first are still loading). Every action that changes what the user
//! is looking at advances a sequence number, and a gateway response is only applied if no other
//! action happened since its request was issued. While a submit is in flight every action other
//! than `reset` is refused, so a created booking always reaches the session.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use meetbook_common::models::{BookingFormData, BookingRequest, TimeSlot};
use meetbook_common::BookingGateway;
use meetbook_config::SessionConfig;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::state::{BookingSession, BookingStep, ErrorCode};
use crate::token::{acquire_token, HostContext};

/// Upper bound of a single gateway call when none is configured.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(15);

// How a gateway call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallFailure {
    Failed,
    TimedOut,
}

// Claimed for the duration of a submit; released on drop, including cancellation.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BookingSessionMachine<G: BookingGateway> {
    gateway: Arc<G>,
    call_timeout: Duration,
    session: Mutex<BookingSession>,
    publisher: watch::Sender<BookingSession>,
    sequence: AtomicU64,
    submitting: AtomicBool,
}

impl<G: BookingGateway> BookingSessionMachine<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_call_timeout(gateway, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_call_timeout(gateway: Arc<G>, call_timeout: Duration) -> Self {
        let (publisher, _) = watch::channel(BookingSession::default());
        Self {
            gateway,
            call_timeout,
            session: Mutex::new(BookingSession::default()),
            publisher,
            sequence: AtomicU64::new(0),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn from_config(gateway: Arc<G>, config: &SessionConfig) -> Self {
        Self::with_call_timeout(gateway, Duration::from_secs(config.call_timeout_secs))
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> BookingSession {
        self.lock().clone()
    }

    /// Receives a new snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<BookingSession> {
        self.publisher.subscribe()
    }

    /// Acquires the token from `host`, validates it and loads the offered dates.
    ///
    /// Only valid in the loading step, and only once per session: a second call while the token
    /// is being validated is rejected. Without a token the gateway is never called.
    pub async fn start(&self, host: &HostContext) -> Result<BookingSession, SessionError> {
        let (seq, token) = self.transition(|session| {
            if session.step != BookingStep::Loading || session.token.is_some() {
                return Err(invalid("start", session));
            }
            let token = acquire_token(host);
            session.token = token.clone();
            session.external_user_id = host.user_id.clone();
            if token.is_none() {
                session.step = BookingStep::Error(ErrorCode::NoToken);
            }
            Ok((self.advance(), token))
        })?;

        let Some(token) = token else {
            info!("Booking session started without a token");
            return Ok(self.snapshot());
        };

        match self.call("validate", self.gateway.validate(&token)).await {
            Ok(true) => debug!("Token accepted"),
            Ok(false) => {
                info!("Booking token rejected");
                return self.settle(seq, |s| s.step = BookingStep::Error(ErrorCode::InvalidToken));
            }
            Err(_) => return self.settle(seq, |s| s.step = BookingStep::Error(ErrorCode::Default)),
        }

        if !self.is_current(seq) {
            debug!("Session changed during token validation, not loading dates");
            return Ok(self.snapshot());
        }

        let dates = self.call("list_dates", self.gateway.list_dates(&token)).await;
        self.settle(seq, |s| {
            s.step = match dates {
                Ok(dates) => {
                    info!("Booking session ready with {} date(s)", dates.len());
                    BookingStep::SelectDate { dates }
                }
                Err(_) => BookingStep::Error(ErrorCode::Default),
            }
        })
    }

    /// Loads the slots of `date`.
    ///
    /// Valid while choosing a date or a time. A response that arrives after another date was
    /// selected (or the session moved on) is dropped.
    pub async fn select_date(&self, date: NaiveDate) -> Result<BookingSession, SessionError> {
        let (seq, token) = self.transition(|session| {
            self.ensure_idle()?;
            let token = match (&session.step, &session.token) {
                (BookingStep::SelectDate { .. } | BookingStep::SelectTime { .. }, Some(token)) => {
                    token.clone()
                }
                _ => return Err(invalid("select_date", session)),
            };
            session.pending_date = Some(date);
            Ok((self.advance(), token))
        })?;
        debug!("Fetching slots for {}", date);

        let slots = self.call("list_slots", self.gateway.list_slots(&token, date)).await;
        self.settle(seq, |s| {
            s.pending_date = None;
            let dates = s.step.dates().to_vec();
            s.step = match slots {
                Ok(slots) if slots.is_empty() => BookingStep::Error(ErrorCode::NoSlots),
                Ok(slots) => BookingStep::SelectTime { dates, date, slots },
                Err(_) => BookingStep::Error(ErrorCode::Default),
            };
        })
    }

    /// Picks one of the offered slots of the selected date.
    pub fn select_slot(&self, slot: TimeSlot) -> Result<BookingSession, SessionError> {
        self.transition(|session| {
            self.ensure_idle()?;
            let BookingStep::SelectTime { dates, date, slots } = &session.step else {
                return Err(invalid("select_slot", session));
            };
            if !slots.contains(&slot) {
                return Err(SessionError::UnknownSlot(slot));
            }
            session.step = BookingStep::FillForm {
                dates: dates.clone(),
                date: *date,
                slots: slots.clone(),
                slot,
            };
            session.pending_date = None;
            self.advance();
            Ok(session.clone())
        })
    }

    /// Steps back from the form to the slots, or from the slots to the dates.
    ///
    /// Refused while a submit is in flight, so a booking the backend already created is never
    /// discarded.
    pub fn back(&self) -> Result<BookingSession, SessionError> {
        self.transition(|session| {
            self.ensure_idle()?;
            session.step = match &session.step {
                BookingStep::FillForm {
                    dates, date, slots, ..
                } => BookingStep::SelectTime {
                    dates: dates.clone(),
                    date: *date,
                    slots: slots.clone(),
                },
                BookingStep::SelectTime { dates, .. } => BookingStep::SelectDate {
                    dates: dates.clone(),
                },
                _ => return Err(invalid("back", session)),
            };
            session.pending_date = None;
            self.advance();
            Ok(session.clone())
        })
    }

    /// Stores a draft of the form without validating it.
    pub fn update_form(&self, form: BookingFormData) -> Result<BookingSession, SessionError> {
        self.transition(|session| {
            self.ensure_idle()?;
            if !matches!(session.step, BookingStep::FillForm { .. }) {
                return Err(invalid("update_form", session));
            }
            session.form_data = form;
            Ok(session.clone())
        })
    }

    /// Validates `form` and submits the booking.
    ///
    /// Submitting before a date and slot were chosen ends the session with `missing_info`, whatever
    /// the form holds. Otherwise an invalid form is reported as [`SessionError::InvalidForm`] and
    /// the user stays on the form. Only one submit may be in flight at a time.
    pub async fn submit(&self, form: BookingFormData) -> Result<BookingSession, SessionError> {
        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(SessionError::SubmitInFlight)?;
        let form = form.normalized();

        let prepared = self.transition(|session| {
            if session.step.is_terminal() {
                return Err(invalid("submit", session));
            }
            match (&session.token, &session.step) {
                (Some(token), BookingStep::FillForm { date, slot, .. }) => {
                    form.validate()?;
                    let token = token.clone();
                    let request = BookingRequest {
                        form: form.clone(),
                        date: *date,
                        slot: *slot,
                        external_user_id: session.external_user_id.clone(),
                    };
                    session.form_data = form.clone();
                    Ok(Some((self.advance(), token, request)))
                }
                _ => {
                    session.form_data = form.clone();
                    session.step = BookingStep::Error(ErrorCode::MissingInfo);
                    self.advance();
                    Ok(None)
                }
            }
        })?;

        let Some((seq, token, request)) = prepared else {
            warn!("Booking submitted without date or slot");
            return Ok(self.snapshot());
        };

        let outcome = self
            .call("create_booking", self.gateway.create_booking(&token, &request))
            .await;
        self.settle(seq, |s| {
            s.step = match outcome {
                Ok(result) => match result.confirmed_id() {
                    Some(id) => {
                        info!("Booking {} confirmed for {} {}", id, request.date, request.slot);
                        BookingStep::Confirmed {
                            booking_id: id.to_string(),
                        }
                    }
                    None => {
                        warn!("Booking not created: {:?}", result.error);
                        BookingStep::Error(ErrorCode::BookingFailed)
                    }
                },
                Err(CallFailure::Failed) => BookingStep::Error(ErrorCode::BookingFailed),
                Err(CallFailure::TimedOut) => BookingStep::Error(ErrorCode::Default),
            }
        })
    }

    /// Drops all session data and returns to the loading step. Pending responses are ignored.
    pub fn reset(&self) -> BookingSession {
        let mut session = self.lock();
        self.advance();
        *session = BookingSession::default();
        self.publisher.send_replace(session.clone());
        debug!("Booking session reset");
        session.clone()
    }

    /// [`reset`](Self::reset) followed by [`start`](Self::start).
    pub async fn restart(&self, host: &HostContext) -> Result<BookingSession, SessionError> {
        self.reset();
        self.start(host).await
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BookingSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Applies `f` to a copy of the session; the copy replaces the session only if `f` succeeds.
    fn transition<T>(
        &self,
        f: impl FnOnce(&mut BookingSession) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut session = self.lock();
        let mut next = session.clone();
        let value = f(&mut next)?;
        if next != *session {
            debug!("Session step: {} -> {}", session.step.kind(), next.step.kind());
            *session = next;
            self.publisher.send_replace(session.clone());
        }
        Ok(value)
    }

    // Applies the result of the request issued at `seq`, unless it is stale.
    fn settle(
        &self,
        seq: u64,
        f: impl FnOnce(&mut BookingSession),
    ) -> Result<BookingSession, SessionError> {
        self.transition(|session| {
            if self.is_current(seq) {
                f(session);
            } else {
                debug!("Discarding stale gateway response (request {})", seq);
            }
            Ok(session.clone())
        })
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.submitting.load(Ordering::Acquire) {
            return Err(SessionError::SubmitInFlight);
        }
        Ok(())
    }

    fn advance(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn is_current(&self, seq: u64) -> bool {
        self.sequence.load(Ordering::Acquire) == seq
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        request: impl Future<Output = Result<T, G::Error>>,
    ) -> Result<T, CallFailure> {
        match timeout(self.call_timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!("Gateway call '{}' failed: {}", operation, e);
                Err(CallFailure::Failed)
            }
            Err(_) => {
                warn!(
                    "Gateway call '{}' timed out after {:?}",
                    operation, self.call_timeout
                );
                Err(CallFailure::TimedOut)
            }
        }
    }
}

fn invalid(action: &'static str, session: &BookingSession) -> SessionError {
    SessionError::InvalidTransition {
        action,
        step: session.step.kind(),
    }
}
