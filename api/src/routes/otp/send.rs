//! Handler for `POST /api/v1/otp/send`

use actix_web::{web, HttpResponse};
use validator::Validate;

use od_core::repositories::{AttemptRepository, BackendConfigRepository, ClientRepository};
use od_core::services::dispatch::OtpSendRequest;
use od_core::services::registry::ConnectorProvisioner;
use od_shared::errors::{error_codes, ErrorResponse};
use od_shared::phone::mask_phone;

use crate::dto::otp::{SendOtpRequest, SendOtpResponse};
use crate::handlers::error::{to_response, validation_response};
use crate::routes::AppState;

/// Dispatch one OTP send request
///
/// On success returns the attempt id, the opaque message id, and the
/// final status. Failures carry the delivery error taxonomy mapped to
/// HTTP statuses; the attempt record (when one was created) stays
/// queryable through the history endpoint.
pub async fn send_otp<A, B, C, P>(
    state: web::Data<AppState<A, B, C, P>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    A: AttemptRepository + 'static,
    B: BackendConfigRepository + 'static,
    C: ClientRepository + 'static,
    P: ConnectorProvisioner + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_response(&errors);
    }

    let mut send_request = OtpSendRequest::new(
        &request.provider,
        &request.phone_number,
        &request.payload,
    );
    match (&request.client_name, &request.sender_id) {
        (Some(client), Some(sender)) => {
            send_request = send_request.with_authorization(client, sender);
        }
        (None, None) => {}
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                "client_name and sender_id must be provided together",
            ));
        }
    }

    tracing::info!(
        provider = %request.provider,
        phone = %mask_phone(&request.phone_number),
        "processing otp send request"
    );

    match state.dispatch_service.dispatch(send_request).await {
        Ok(outcome) => HttpResponse::Ok().json(SendOtpResponse {
            message: "OTP sent successfully".to_string(),
            id: outcome.attempt.id,
            message_id: outcome.receipt.message_id,
            status: outcome.attempt.status.to_string(),
        }),
        Err(error) => {
            tracing::error!(
                provider = %request.provider,
                phone = %mask_phone(&request.phone_number),
                error = %error,
                "otp send request failed"
            );
            to_response(&error)
        }
    }
}
