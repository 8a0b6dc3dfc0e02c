//! DTOs for the OTP send and history endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use od_core::domain::entities::otp_attempt::OtpAttempt;

/// Body of `POST /api/v1/otp/send`
///
/// `payload` carries either the raw OTP code or a complete message body,
/// depending on the deployment's payload mode. Phone numbers are accepted
/// verbatim; format validation is out of scope for this service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Name of the registered backend to dispatch through
    #[validate(length(min = 1, max = 64))]
    pub provider: String,

    /// Destination phone number
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,

    /// OTP code or message body
    #[validate(length(min = 1, max = 512))]
    pub payload: String,

    /// Optional client name for the sender authorization check
    #[validate(length(min = 1, max = 64))]
    pub client_name: Option<String>,

    /// Optional sender identifier for the authorization check
    #[validate(length(min = 1, max = 64))]
    pub sender_id: Option<String>,
}

/// Body of a successful send response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub message: String,
    /// Identifier of the recorded attempt
    pub id: i64,
    /// Opaque message identifier from the delivery receipt
    pub message_id: String,
    /// Final attempt status
    pub status: String,
}

/// One attempt row in the history listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptDto {
    pub id: i64,
    pub provider: String,
    pub phone_number: String,
    pub payload: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<OtpAttempt> for AttemptDto {
    fn from(attempt: OtpAttempt) -> Self {
        Self {
            id: attempt.id,
            provider: attempt.provider,
            phone_number: attempt.phone_number,
            payload: attempt.payload,
            status: attempt.status.to_string(),
            created_at: attempt.created_at,
        }
    }
}
