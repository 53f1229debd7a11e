// --- File: crates/meetbook_common/src/wire.rs ---

// Request and response bodies of the booking HTTP API. The reference backend deserializes what the
// HTTP gateway serializes, so both sides share these definitions.

use serde::{Deserialize, Serialize};

use crate::models::{hhmm, AccessToken, BookingRequest, DateInfo, TimeSlot, ISO_DATE_FORMAT};

/// `token` as a query parameter or JSON body.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenParams {
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
}

/// Query of `available-dates`. `days` is kept raw so malformed values can fall back to the default.
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatesQuery {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub days: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatesResponse {
    pub dates: Vec<DateInfo>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotsQuery {
    #[serde(default)]
    pub token: Option<String>,
    /// `yyyy-MM-dd`
    #[serde(default)]
    pub date: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub slots: Vec<TimeSlot>,
}

/// Body of `create-booking`.
///
/// Every field is optional on the wire; the backend decides which ones are required.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    pub end_time: Option<String>,
    /// User id of the host application the booking was made from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<String>,
}

impl CreateBookingPayload {
    pub fn from_request(token: &AccessToken, request: &BookingRequest) -> Self {
        let form = request.form.clone().normalized();
        Self {
            token: Some(token.as_str().to_string()),
            name: Some(form.name),
            email: Some(form.email),
            title: Some(form.title),
            description: form.description,
            date: Some(request.date.format(ISO_DATE_FORMAT).to_string()),
            start_time: Some(request.slot.start.format(hhmm::FORMAT).to_string()),
            end_time: Some(request.slot.end.format(hhmm::FORMAT).to_string()),
            telegram_id: request.external_user_id.clone(),
        }
    }
}
