//! Delivery status store interface.
//!
//! One record per OTP send attempt. Only the dispatch orchestrator mutates
//! a given record, and it does so at most twice (`pending -> sent|failed`,
//! optionally `sent -> delivered`). Each write is individually atomic; the
//! create and the final status write are deliberately not one transaction,
//! so a crash in between leaves an observable `pending` record.

use async_trait::async_trait;

use crate::domain::entities::otp_attempt::{OtpAttempt, OtpStatus};
use crate::errors::DomainError;

/// Repository trait for OTP attempt persistence
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Persist a new attempt and assign its monotonic identifier
    ///
    /// Returns the attempt with `id` filled in.
    async fn create(&self, attempt: OtpAttempt) -> Result<OtpAttempt, DomainError>;

    /// Advance the status of an existing attempt
    ///
    /// # Errors
    ///
    /// * `DomainError::NotFound` - no attempt with the given id
    /// * `DomainError::TerminalStatus` - the attempt already reached
    ///   `delivered` or `failed`
    /// * `DomainError::Validation` - the transition is not monotonic
    async fn update_status(&self, id: i64, new_status: OtpStatus) -> Result<(), DomainError>;

    /// Find an attempt by its identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<OtpAttempt>, DomainError>;

    /// List every attempt, ordered by creation
    ///
    /// No pagination: the audit surface returns the full history.
    async fn list_all(&self) -> Result<Vec<OtpAttempt>, DomainError>;
}
