//! Route tests for the OTP send and history endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use od_api::app::create_app;

#[actix_rt::test]
async fn test_send_otp_success() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "provider": "acme",
            "phone_number": "+61412345678",
            "payload": "123456"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "OTP sent successfully");
    assert_eq!(body["status"], "delivered");
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(!body["message_id"].as_str().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_send_otp_unknown_provider() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "provider": "ghost",
            "phone_number": "+61412345678",
            "payload": "123456"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "UNKNOWN_PROVIDER");
    assert!(body["message"].as_str().unwrap().contains("ghost"));
}

#[actix_rt::test]
async fn test_send_otp_validation_failure() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "provider": "",
            "phone_number": "+61412345678",
            "payload": "123456"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_send_otp_partial_authorization_fields() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "provider": "acme",
            "phone_number": "+61412345678",
            "payload": "123456",
            "client_name": "c1"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_send_failure_surfaces_and_is_recorded() {
    let state = common::test_state(true, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "provider": "acme",
            "phone_number": "+61412345678",
            "payload": "123456"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "TRANSMISSION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("submit rejected"));

    // The failed attempt stays queryable through the history endpoint
    let request = test::TestRequest::get().uri("/api/v1/otp/history").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let history: Value = test::read_body_json(response).await;
    let rows = history.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "failed");
}

#[actix_rt::test]
async fn test_history_lists_attempts_in_order() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    for phone in ["+61412340001", "+61412340002"] {
        let request = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .set_json(json!({
                "provider": "acme",
                "phone_number": phone,
                "payload": "123456"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let request = test::TestRequest::get().uri("/api/v1/otp/history").to_request();
    let response = test::call_service(&app, request).await;
    let history: Value = test::read_body_json(response).await;
    let rows = history.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["phone_number"], "+61412340001");
    assert_eq!(rows[1]["phone_number"], "+61412340002");
    assert!(rows[0]["id"].as_i64().unwrap() < rows[1]["id"].as_i64().unwrap());
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::get().uri("/health").to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "healthy");
}
