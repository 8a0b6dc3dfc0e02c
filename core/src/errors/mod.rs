//! Domain-specific error types and error handling.

use thiserror::Error;

/// Delivery-path errors surfaced by backend adapters and the provisioner
///
/// These carry the failure taxonomy the orchestrator translates into
/// status updates and caller-visible responses.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// No backend config registered under the requested provider name
    #[error("Unknown provider: {provider}")]
    UnknownProvider { provider: String },

    /// The backend could not be reached (connect/bind or transport failure)
    #[error("Backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    /// The backend was reachable but rejected or failed the send
    #[error("Transmission failed: {reason}")]
    TransmissionFailed { reason: String },

    /// Gateway connector provisioning failed at registration time
    #[error("Provisioning failed: {reason}")]
    Provisioning { reason: String },
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Sender '{sender}' is not allowed for client '{client}'")]
    SenderNotAllowed { client: String, sender: String },

    /// Status update attempted on an attempt already in a terminal state
    #[error("Attempt {id} already reached terminal status '{status}'")]
    TerminalStatus { id: i64, status: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_error_messages() {
        let err = DeliveryError::UnknownProvider {
            provider: "acme".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown provider: acme");

        let err = DeliveryError::BackendUnavailable {
            reason: "connect timed out".to_string(),
        };
        assert!(err.to_string().contains("connect timed out"));
    }

    #[test]
    fn test_delivery_error_wraps_transparently() {
        let err: DomainError = DeliveryError::TransmissionFailed {
            reason: "submit rejected".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Transmission failed: submit rejected");
    }
}
