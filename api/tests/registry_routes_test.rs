//! Route tests for the provider and client registry endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use od_api::app::create_app;

#[actix_rt::test]
async fn test_register_http_provider() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/providers")
        .set_json(json!({
            "name": "carrier",
            "kind": "http",
            "host": "sms.example.com",
            "port": 443,
            "username": "api-key",
            "password": "api-secret",
            "sender_id": "OTPService"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["name"], "carrier");
    assert_eq!(body["kind"], "http");
    assert_eq!(body["provisioned"], true);
    // Credentials never leave the service
    assert!(body.get("password").is_none());
}

#[actix_rt::test]
async fn test_register_smpp_provider_provisioning_failure() {
    let state = common::test_state(false, true).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/providers")
        .set_json(json!({
            "name": "gateway-2",
            "kind": "smpp",
            "host": "10.0.0.7",
            "port": 2775,
            "username": "smpp_user",
            "password": "smpp_pass"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "PROVISIONING_FAILED");

    // The config row is retained, unprovisioned, for operator inspection
    let request = test::TestRequest::get().uri("/api/v1/providers").to_request();
    let response = test::call_service(&app, request).await;
    let providers: Value = test::read_body_json(response).await;
    let row = providers
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "gateway-2")
        .expect("registered backend should be listed");
    assert_eq!(row["provisioned"], false);
}

#[actix_rt::test]
async fn test_register_provider_rejects_unknown_kind() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/providers")
        .set_json(json!({
            "name": "pigeon",
            "kind": "carrier-pigeon",
            "host": "coop.example.com",
            "port": 1,
            "username": "u",
            "password": "p"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_duplicate_provider_name() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    // "acme" is seeded by the fixture
    let request = test::TestRequest::post()
        .uri("/api/v1/providers")
        .set_json(json!({
            "name": "acme",
            "kind": "smpp",
            "host": "10.0.0.5",
            "port": 2775,
            "username": "u",
            "password": "p"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_client_lifecycle_with_cascade_delete() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(json!({
            "name": "c1",
            "allowed_senders": ["A", "B"]
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["allowed_senders"], json!(["A", "B"]));

    let request = test::TestRequest::get().uri("/api/v1/clients").to_request();
    let response = test::call_service(&app, request).await;
    let clients: Value = test::read_body_json(response).await;
    assert_eq!(clients.as_array().unwrap().len(), 1);

    // Removing the client removes its senders with it
    let request = test::TestRequest::delete().uri("/api/v1/clients/c1").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = test::TestRequest::get().uri("/api/v1/clients").to_request();
    let response = test::call_service(&app, request).await;
    let clients: Value = test::read_body_json(response).await;
    assert!(clients.as_array().unwrap().is_empty());

    // A second delete reports not-found
    let request = test::TestRequest::delete().uri("/api/v1/clients/c1").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_authorized_send_through_registered_client() {
    let state = common::test_state(false, false).await;
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(json!({
            "name": "c1",
            "allowed_senders": ["OTPService"]
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Allowed sender passes
    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "provider": "acme",
            "phone_number": "+61412345678",
            "payload": "123456",
            "client_name": "c1",
            "sender_id": "OTPService"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Unlisted sender is rejected
    let request = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({
            "provider": "acme",
            "phone_number": "+61412345678",
            "payload": "123456",
            "client_name": "c1",
            "sender_id": "Marketing"
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
