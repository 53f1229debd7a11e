//! HTTP client for the booking backend.
//!
//! [`HttpBookingGateway`] implements [`BookingGateway`] against the four endpoints of the booking
//! API: `validate-token`, `available-dates`, `time-slots` and `create-booking`.

use crate::error::GatewayError;
use async_trait::async_trait;
use chrono::NaiveDate;
use meetbook_common::http::client::create_client;
use meetbook_common::models::{
    AccessToken, BookingRequest, BookingResult, DateInfo, TimeSlot, ISO_DATE_FORMAT,
};
use meetbook_common::wire::{
    CreateBookingPayload, DatesResponse, SlotsResponse, ValidateTokenResponse,
};
use meetbook_common::BookingGateway;
use meetbook_config::GatewayConfig;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

/// Booking gateway backed by the booking HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBookingGateway {
    client: Client,
    base_url: String,
    days: u32,
}

impl HttpBookingGateway {
    /// Creates a gateway for the API at `base_url`.
    ///
    /// `days` is the window requested from `available-dates`.
    pub fn new(base_url: &str, timeout_secs: u64, days: u32) -> Result<Self, GatewayError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(GatewayError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }
        let client = create_client(timeout_secs, true)?;
        Ok(Self {
            client,
            base_url,
            days,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Self::new(&config.base_url, config.timeout_secs, config.days)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch_dates(&self, token: &AccessToken) -> Result<Vec<DateInfo>, GatewayError> {
        let days = self.days.to_string();
        let response = self
            .client
            .get(self.endpoint("available-dates"))
            .query(&[("token", token.as_str()), ("days", days.as_str())])
            .send()
            .await?;
        let body: DatesResponse = expect_success(response).await?.json().await?;
        Ok(body.dates)
    }
}

// Maps 401 and other non-success statuses to errors.
async fn expect_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(GatewayError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    type Error = GatewayError;

    async fn validate(&self, token: &AccessToken) -> Result<bool, GatewayError> {
        let response = self
            .client
            .get(self.endpoint("validate-token"))
            .query(&[("token", token.as_str())])
            .send()
            .await?;

        match expect_success(response).await {
            Ok(response) => {
                let body: ValidateTokenResponse = response.json().await?;
                debug!("Token validation result: {}", body.valid);
                Ok(body.valid)
            }
            Err(GatewayError::Unauthorized) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_dates(&self, token: &AccessToken) -> Result<Vec<DateInfo>, GatewayError> {
        match self.fetch_dates(token).await {
            Ok(dates) => Ok(dates),
            Err(e) => {
                warn!("Fetching available dates failed, offering none: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn list_slots(
        &self,
        token: &AccessToken,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, GatewayError> {
        let date = date.format(ISO_DATE_FORMAT).to_string();
        let response = self
            .client
            .get(self.endpoint("time-slots"))
            .query(&[("token", token.as_str()), ("date", date.as_str())])
            .send()
            .await?;
        let body: SlotsResponse = expect_success(response).await?.json().await?;
        debug!("{} slot(s) offered on {}", body.slots.len(), date);
        Ok(body.slots)
    }

    async fn create_booking(
        &self,
        token: &AccessToken,
        request: &BookingRequest,
    ) -> Result<BookingResult, GatewayError> {
        let payload = CreateBookingPayload::from_request(token, request);
        let response = self
            .client
            .post(self.endpoint("create-booking"))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Rejections still carry a `{success: false, error}` body.
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<BookingResult>(&body) {
            Ok(result) => {
                warn!(
                    "Booking rejected with status {}: {:?}",
                    status.as_u16(),
                    result.error
                );
                Ok(result)
            }
            Err(_) => Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
