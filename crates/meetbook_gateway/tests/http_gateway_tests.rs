use chrono::{NaiveDate, NaiveTime};
use meetbook_common::models::{AccessToken, BookingFormData, BookingRequest, DayOfWeek, TimeSlot};
use meetbook_common::BookingGateway;
use meetbook_gateway::{GatewayError, HttpBookingGateway};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> AccessToken {
    AccessToken::new("demo123")
}

fn gateway(server: &MockServer) -> HttpBookingGateway {
    HttpBookingGateway::new(&server.uri(), 2, 14).unwrap()
}

fn booking_request() -> BookingRequest {
    BookingRequest {
        form: BookingFormData {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            title: "Kickoff".to_string(),
            description: Some("Agenda".to_string()),
        },
        date: NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
        slot: TimeSlot::starting_at(NaiveTime::from_hms_opt(14, 0, 0).unwrap()).unwrap(),
        external_user_id: Some("4711".to_string()),
    }
}

#[tokio::test]
async fn test_validate_reads_valid_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/validate-token"))
        .and(query_param("token", "demo123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": true })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(gateway(&server).validate(&token()).await.unwrap());
}

#[tokio::test]
async fn test_validate_treats_401_as_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/validate-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid token" })))
        .mount(&server)
        .await;

    assert!(!gateway(&server).validate(&token()).await.unwrap());
}

#[tokio::test]
async fn test_validate_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/validate-token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = gateway(&server).validate(&token()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_list_dates_requests_configured_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/available-dates"))
        .and(query_param("token", "demo123"))
        .and(query_param("days", "14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dates": [
                { "date": "2025-05-05", "day_of_week": "Monday", "has_slots": true },
                { "date": "2025-05-06", "day_of_week": "Tuesday", "has_slots": false }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dates = gateway(&server).list_dates(&token()).await.unwrap();
    assert_eq!(dates.len(), 2);
    assert_eq!(dates[0].day_of_week, DayOfWeek::Monday);
    assert!(!dates[1].has_slots);
}

#[tokio::test]
async fn test_list_dates_failure_becomes_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/available-dates"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid token" })))
        .mount(&server)
        .await;

    let dates = gateway(&server).list_dates(&token()).await.unwrap();
    assert!(dates.is_empty());

    // Undecodable body
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/available-dates"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;
    assert!(gateway(&server).list_dates(&token()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_slots_parses_slots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/time-slots"))
        .and(query_param("token", "demo123"))
        .and(query_param("date", "2025-05-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slots": [
                { "start": "09:00", "end": "10:00" },
                { "start": "13:00", "end": "14:00" }
            ]
        })))
        .mount(&server)
        .await;

    let slots = gateway(&server)
        .list_slots(&token(), NaiveDate::from_ymd_opt(2025, 5, 5).unwrap())
        .await
        .unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].to_string(), "13:00 - 14:00");
}

#[tokio::test]
async fn test_list_slots_reports_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/time-slots"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Date is required" })))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .list_slots(&token(), NaiveDate::from_ymd_opt(2025, 5, 5).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 400, .. }));
}

#[tokio::test]
async fn test_list_slots_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/time-slots"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "slots": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let gateway = HttpBookingGateway::new(&server.uri(), 1, 14).unwrap();
    let err = gateway
        .list_slots(&token(), NaiveDate::from_ymd_opt(2025, 5, 5).unwrap())
        .await
        .unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_create_booking_sends_flattened_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-booking"))
        .and(body_partial_json(json!({
            "token": "demo123",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "title": "Kickoff",
            "description": "Agenda",
            "date": "2025-05-05",
            "start_time": "14:00",
            "end_time": "15:00",
            "telegram_id": "4711"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "booking_id": "abc123" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway(&server)
        .create_booking(&token(), &booking_request())
        .await
        .unwrap();
    assert_eq!(result.confirmed_id(), Some("abc123"));
}

#[tokio::test]
async fn test_create_booking_rejection_is_a_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-booking"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "Missing required fields"
        })))
        .mount(&server)
        .await;

    let result = gateway(&server)
        .create_booking(&token(), &booking_request())
        .await
        .unwrap();
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Missing required fields"));
}

#[tokio::test]
async fn test_create_booking_unauthorized_and_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-booking"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid token" })))
        .mount(&server)
        .await;
    let err = gateway(&server)
        .create_booking(&token(), &booking_request())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-booking"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    let err = gateway(&server)
        .create_booking(&token(), &booking_request())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 502, .. }));
}
