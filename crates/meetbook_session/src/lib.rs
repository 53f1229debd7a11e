// --- File: crates/meetbook_session/src/lib.rs ---
// Declare modules within this crate
pub mod error;
pub mod machine;
pub mod messages;
pub mod state;
pub mod token;

pub use error::SessionError;
pub use machine::{BookingSessionMachine, DEFAULT_CALL_TIMEOUT};
pub use messages::{message_for, ERROR_MESSAGES};
pub use state::{BookingSession, BookingStep, ErrorCode, StepKind};
pub use token::{acquire_token, HostContext};
