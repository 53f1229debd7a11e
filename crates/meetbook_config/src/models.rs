// --- File: crates/meetbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

// --- Calendar Config ---
// The single calendar timezone used to decide what "today" is.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CalendarConfig {
    pub time_zone: String, // IANA name, e.g. "Europe/Zurich"
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            time_zone: "Europe/Zurich".to_string(),
        }
    }
}

// --- Availability Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// Number of consecutive days (starting today) offered by default.
    pub window_days: u32,
    /// Start of the working window, "HH:MM".
    pub work_start: String,
    /// End of the working window, "HH:MM".
    pub work_end: String,
    pub weekday_open_probability: f64,
    pub weekend_open_probability: f64,
    pub slot_open_probability: f64,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            window_days: 14,
            work_start: "09:00".to_string(),
            work_end: "17:00".to_string(),
            weekday_open_probability: 0.7,
            weekend_open_probability: 0.3,
            slot_open_probability: 0.7,
        }
    }
}

// --- Reference API Config ---
// Tokens are demo values; issuing real tokens is handled elsewhere.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub valid_tokens: Vec<String>,
    pub max_window_days: u32,
    /// Seed for the availability generator. Unset means a fresh seed per process.
    pub seed: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            valid_tokens: vec!["demo123".to_string()],
            max_window_days: 90,
            seed: None,
        }
    }
}

// --- Gateway Config ---
// Where the session's HTTP gateway finds the booking backend.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Window requested from `available-dates`.
    pub days: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            timeout_secs: 10,
            days: 14,
        }
    }
}

// --- Session Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Upper bound for every gateway call made by a booking session.
    pub call_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: 15,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub availability: AvailabilityConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub session: SessionConfig,
}
