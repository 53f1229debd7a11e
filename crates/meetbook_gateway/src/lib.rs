// --- File: crates/meetbook_gateway/src/lib.rs ---
pub mod client;
pub mod error;

pub use client::HttpBookingGateway;
pub use error::GatewayError;
