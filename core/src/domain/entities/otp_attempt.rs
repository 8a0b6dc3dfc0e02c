//! OTP send attempt entity and its delivery status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Delivery status of an OTP send attempt
///
/// Transitions are monotonic: `pending -> sent -> delivered`, or
/// `pending|sent -> failed`. `delivered` and `failed` are terminal and no
/// further update is accepted.
///
/// Note that `delivered` is an optimistic label: none of the supported
/// backends deliver an asynchronous carrier receipt, so it means "accepted
/// for transmission", not a confirmed handset delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
}

impl OtpStatus {
    /// Stable string form, matching the database enum values
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpStatus::Pending => "pending",
            OtpStatus::Sent => "sent",
            OtpStatus::Delivered => "delivered",
            OtpStatus::Failed => "failed",
        }
    }

    /// Whether this status accepts no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OtpStatus::Delivered | OtpStatus::Failed)
    }

    /// Whether a transition from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: OtpStatus) -> bool {
        matches!(
            (self, next),
            (OtpStatus::Pending, OtpStatus::Sent)
                | (OtpStatus::Pending, OtpStatus::Failed)
                | (OtpStatus::Sent, OtpStatus::Delivered)
                | (OtpStatus::Sent, OtpStatus::Failed)
        )
    }
}

impl std::fmt::Display for OtpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OtpStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OtpStatus::Pending),
            "sent" => Ok(OtpStatus::Sent),
            "delivered" => Ok(OtpStatus::Delivered),
            "failed" => Ok(OtpStatus::Failed),
            other => Err(DomainError::Internal {
                message: format!("unrecognized attempt status '{}'", other),
            }),
        }
    }
}

/// One OTP send attempt
///
/// Exactly one record is created per accepted send request. Records are
/// append-only: the status advances through the lifecycle above and the
/// record is never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpAttempt {
    /// Monotonically assigned identifier, set by the status store
    pub id: i64,

    /// Name of the backend config the attempt was dispatched through
    pub provider: String,

    /// Destination address, stored verbatim (not validated here)
    pub phone_number: String,

    /// Raw OTP code or freeform message body, depending on deployment
    pub payload: String,

    /// Current delivery status
    pub status: OtpStatus,

    /// Timestamp when the attempt was created, immutable
    pub created_at: DateTime<Utc>,
}

impl OtpAttempt {
    /// Create a new attempt in `pending`; the id is assigned on persist
    pub fn new(
        provider: impl Into<String>,
        phone_number: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            provider: provider.into(),
            phone_number: phone_number.into(),
            payload: payload.into(),
            status: OtpStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Advance the status, enforcing the monotonic lifecycle
    ///
    /// Returns `TerminalStatus` if the attempt already reached `delivered`
    /// or `failed`, and a validation error for any other illegal jump
    /// (for example `pending -> delivered`).
    pub fn transition(&mut self, next: OtpStatus) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::TerminalStatus {
                id: self.id,
                status: self.status.to_string(),
            });
        }
        if !self.status.can_transition_to(next) {
            return Err(DomainError::Validation {
                message: format!(
                    "illegal status transition {} -> {} for attempt {}",
                    self.status, next, self.id
                ),
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attempt_starts_pending() {
        let attempt = OtpAttempt::new("acme", "+61412345678", "123456");
        assert_eq!(attempt.status, OtpStatus::Pending);
        assert_eq!(attempt.id, 0);
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut attempt = OtpAttempt::new("acme", "+61412345678", "123456");
        attempt.transition(OtpStatus::Sent).unwrap();
        attempt.transition(OtpStatus::Delivered).unwrap();
        assert_eq!(attempt.status, OtpStatus::Delivered);
    }

    #[test]
    fn test_failure_transitions() {
        let mut attempt = OtpAttempt::new("acme", "+61412345678", "123456");
        attempt.transition(OtpStatus::Failed).unwrap();
        assert_eq!(attempt.status, OtpStatus::Failed);

        let mut attempt = OtpAttempt::new("acme", "+61412345678", "123456");
        attempt.transition(OtpStatus::Sent).unwrap();
        attempt.transition(OtpStatus::Failed).unwrap();
        assert_eq!(attempt.status, OtpStatus::Failed);
    }

    #[test]
    fn test_terminal_states_reject_updates() {
        for terminal in [OtpStatus::Delivered, OtpStatus::Failed] {
            let mut attempt = OtpAttempt::new("acme", "+61412345678", "123456");
            attempt.status = terminal;
            for next in [
                OtpStatus::Pending,
                OtpStatus::Sent,
                OtpStatus::Delivered,
                OtpStatus::Failed,
            ] {
                let err = attempt.transition(next).unwrap_err();
                assert!(matches!(err, DomainError::TerminalStatus { .. }));
            }
        }
    }

    #[test]
    fn test_skipping_sent_is_rejected() {
        let mut attempt = OtpAttempt::new("acme", "+61412345678", "123456");
        let err = attempt.transition(OtpStatus::Delivered).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(attempt.status, OtpStatus::Pending);
    }

    #[test]
    fn test_serialization() {
        let attempt = OtpAttempt::new("acme", "+61412345678", "123456");

        let json = serde_json::to_string(&attempt).unwrap();
        assert!(json.contains("\"pending\""));

        let deserialized: OtpAttempt = serde_json::from_str(&json).unwrap();
        assert_eq!(attempt, deserialized);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OtpStatus::Pending,
            OtpStatus::Sent,
            OtpStatus::Delivered,
            OtpStatus::Failed,
        ] {
            let parsed: OtpStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("bogus".parse::<OtpStatus>().is_err());
    }
}
