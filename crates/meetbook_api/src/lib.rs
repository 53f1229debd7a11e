// --- File: crates/meetbook_api/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod handlers;
pub mod routes;
pub mod store;

pub use handlers::ApiState;
pub use routes::routes;
