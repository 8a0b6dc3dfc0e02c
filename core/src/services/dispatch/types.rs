//! Request and result types for the dispatch service

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::otp_attempt::OtpAttempt;

/// Optional sender authorization attached to a send request
///
/// When present, the orchestrator verifies the sender identifier against
/// the named client's allow-list before dispatching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderAuthorization {
    pub client_name: String,
    pub sender_id: String,
}

/// An inbound OTP send request
#[derive(Debug, Clone)]
pub struct OtpSendRequest {
    /// Name of the registered backend to dispatch through
    pub provider: String,

    /// Destination address
    pub phone_number: String,

    /// Raw OTP code or freeform message body (see `DispatchConfig`)
    pub payload: String,

    /// Optional client/sender authorization check
    pub authorization: Option<SenderAuthorization>,
}

impl OtpSendRequest {
    pub fn new(
        provider: impl Into<String>,
        phone_number: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            phone_number: phone_number.into(),
            payload: payload.into(),
            authorization: None,
        }
    }

    /// Attach a client/sender authorization check
    pub fn with_authorization(mut self, client_name: impl Into<String>, sender_id: impl Into<String>) -> Self {
        self.authorization = Some(SenderAuthorization {
            client_name: client_name.into(),
            sender_id: sender_id.into(),
        });
        self
    }
}

/// Receipt returned by a delivery backend for one transmitted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Opaque message identifier generated for this transmission
    pub message_id: String,

    /// Identifier assigned by the gateway/carrier, when one was returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
}

impl DeliveryReceipt {
    /// Create a receipt with a freshly generated opaque message id
    pub fn generate() -> Self {
        Self {
            message_id: Uuid::new_v4().simple().to_string(),
            provider_message_id: None,
        }
    }

    /// Attach the gateway-assigned message id
    pub fn with_provider_message_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.is_empty() {
            self.provider_message_id = Some(id);
        }
        self
    }
}

/// Outcome of a successfully dispatched send request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// The attempt record, with its final status
    pub attempt: OtpAttempt,

    /// The delivery receipt from the backend
    pub receipt: DeliveryReceipt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_receipt_is_opaque_hex() {
        let receipt = DeliveryReceipt::generate();
        assert_eq!(receipt.message_id.len(), 32);
        assert!(receipt.provider_message_id.is_none());
    }

    #[test]
    fn test_empty_provider_id_is_dropped() {
        let receipt = DeliveryReceipt::generate().with_provider_message_id("");
        assert!(receipt.provider_message_id.is_none());
    }
}
