//! Domain error to HTTP response mapping
//!
//! Every failure is returned to the caller with a stable error code and
//! the original reason as the message; nothing is swallowed on the way
//! out.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use od_core::errors::{DeliveryError, DomainError};
use od_shared::errors::{error_codes, ErrorResponse};

/// Translate a domain error into the HTTP response for the caller
pub fn to_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Delivery(delivery) => delivery_response(delivery),
        DomainError::Validation { .. } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, error.to_string())),
        DomainError::NotFound { .. } => HttpResponse::NotFound()
            .json(ErrorResponse::new(error_codes::NOT_FOUND, error.to_string())),
        DomainError::SenderNotAllowed { .. } => HttpResponse::Forbidden()
            .json(ErrorResponse::new(error_codes::SENDER_NOT_ALLOWED, error.to_string())),
        DomainError::TerminalStatus { .. } => HttpResponse::Conflict()
            .json(ErrorResponse::new(error_codes::TERMINAL_STATUS, error.to_string())),
        DomainError::Internal { .. } => HttpResponse::InternalServerError()
            .json(ErrorResponse::new(error_codes::INTERNAL_ERROR, error.to_string())),
    }
}

fn delivery_response(error: &DeliveryError) -> HttpResponse {
    match error {
        DeliveryError::UnknownProvider { .. } => HttpResponse::NotFound()
            .json(ErrorResponse::new(error_codes::UNKNOWN_PROVIDER, error.to_string())),
        DeliveryError::BackendUnavailable { .. } => HttpResponse::ServiceUnavailable()
            .json(ErrorResponse::new(error_codes::BACKEND_UNAVAILABLE, error.to_string())),
        DeliveryError::TransmissionFailed { .. } => HttpResponse::BadGateway()
            .json(ErrorResponse::new(error_codes::TRANSMISSION_FAILED, error.to_string())),
        DeliveryError::Provisioning { .. } => HttpResponse::BadGateway()
            .json(ErrorResponse::new(error_codes::PROVISIONING_FAILED, error.to_string())),
    }
}

/// Translate request body validation failures into a 400 response
pub fn validation_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Invalid request data".to_string(),
    );
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }
    HttpResponse::BadRequest().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    fn status_for(error: DomainError) -> StatusCode {
        to_response(&error).status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            status_for(DomainError::Delivery(DeliveryError::UnknownProvider {
                provider: "x".into()
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(DomainError::Delivery(DeliveryError::BackendUnavailable {
                reason: "down".into()
            })),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(DomainError::Delivery(DeliveryError::TransmissionFailed {
                reason: "rejected".into()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(DomainError::Delivery(DeliveryError::Provisioning {
                reason: "console".into()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(DomainError::Validation { message: "x".into() }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(DomainError::NotFound { resource: "x".into() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(DomainError::SenderNotAllowed {
                client: "c".into(),
                sender: "s".into()
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(DomainError::TerminalStatus {
                id: 1,
                status: "failed".into()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(DomainError::Internal { message: "x".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
