//! HTTP carrier adapter tests against an in-process server

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use od_core::domain::entities::backend_config::{BackendConfig, BackendKind};
use od_core::errors::DeliveryError;
use od_core::services::dispatch::DeliveryBackend;

use crate::config::CarrierConfig;
use crate::delivery::http_backend::HttpCarrierBackend;

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Serve one HTTP exchange with a canned response, returning the port and
/// a handle resolving to the raw request bytes
async fn one_shot_server(response: String) -> (u16, tokio::task::JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if let Some(header_end) = find(&request, b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        request
    });
    (port, handle)
}

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}

fn carrier_adapter() -> HttpCarrierBackend {
    let config = CarrierConfig {
        scheme: "http".to_string(),
        timeout_secs: 2,
    };
    HttpCarrierBackend::new(&config).unwrap()
}

fn backend_config(port: u16) -> BackendConfig {
    BackendConfig::new("carrier", BackendKind::Http, "127.0.0.1", port, "key", "secret")
        .with_sender_id("OTPService")
}

#[tokio::test]
async fn test_successful_submission() {
    let (port, request) =
        one_shot_server(http_response("200 OK", r#"{"message_id":"carrier-7"}"#)).await;

    let receipt = carrier_adapter()
        .send("+61412345678", "Your OTP is: 123456", &backend_config(port))
        .await
        .unwrap();

    assert_eq!(receipt.provider_message_id.as_deref(), Some("carrier-7"));

    // The submission carried destination, sender, body, and basic auth
    let raw = request.await.unwrap();
    let raw = String::from_utf8_lossy(&raw);
    assert!(raw.starts_with("POST /messages"));
    assert!(raw.contains("authorization: Basic") || raw.contains("Authorization: Basic"));
    assert!(raw.contains(r#""to":"+61412345678""#));
    assert!(raw.contains(r#""from":"OTPService""#));
    assert!(raw.contains(r#""message":"Your OTP is: 123456""#));
}

#[tokio::test]
async fn test_error_indicator_in_response_body() {
    let (port, _request) =
        one_shot_server(http_response("200 OK", r#"{"error":"invalid sender"}"#)).await;

    let err = carrier_adapter()
        .send("+61412345678", "Your OTP is: 123456", &backend_config(port))
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::TransmissionFailed { .. }));
    assert!(err.to_string().contains("invalid sender"));
}

#[tokio::test]
async fn test_http_error_status() {
    let (port, _request) =
        one_shot_server(http_response("500 Internal Server Error", r#"{"error":"boom"}"#)).await;

    let err = carrier_adapter()
        .send("+61412345678", "Your OTP is: 123456", &backend_config(port))
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::TransmissionFailed { .. }));
}

#[tokio::test]
async fn test_malformed_response_body() {
    let (port, _request) = one_shot_server(http_response("200 OK", "not json")).await;

    let err = carrier_adapter()
        .send("+61412345678", "Your OTP is: 123456", &backend_config(port))
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::TransmissionFailed { .. }));
    assert!(err.to_string().contains("malformed"));
}

#[tokio::test]
async fn test_unreachable_carrier() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = carrier_adapter()
        .send("+61412345678", "Your OTP is: 123456", &backend_config(port))
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::BackendUnavailable { .. }));
}
