//! Mock implementation of AttemptRepository for testing

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_attempt::{OtpAttempt, OtpStatus};
use crate::errors::DomainError;

use super::trait_::AttemptRepository;

/// In-memory attempt store for tests
///
/// Ids are assigned from an atomic counter; iteration order of the
/// `BTreeMap` matches creation order, mirroring the database's
/// auto-increment ordering.
pub struct MockAttemptRepository {
    attempts: Arc<RwLock<BTreeMap<i64, OtpAttempt>>>,
    next_id: AtomicI64,
}

impl MockAttemptRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored attempts
    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.attempts.read().await.is_empty()
    }
}

impl Default for MockAttemptRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttemptRepository for MockAttemptRepository {
    async fn create(&self, mut attempt: OtpAttempt) -> Result<OtpAttempt, DomainError> {
        let mut attempts = self.attempts.write().await;
        attempt.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        attempts.insert(attempt.id, attempt.clone());
        Ok(attempt)
    }

    async fn update_status(&self, id: i64, new_status: OtpStatus) -> Result<(), DomainError> {
        let mut attempts = self.attempts.write().await;
        let attempt = attempts.get_mut(&id).ok_or(DomainError::NotFound {
            resource: format!("attempt {}", id),
        })?;
        attempt.transition(new_status)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<OtpAttempt>, DomainError> {
        let attempts = self.attempts.read().await;
        Ok(attempts.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<OtpAttempt>, DomainError> {
        let attempts = self.attempts.read().await;
        Ok(attempts.values().cloned().collect())
    }
}
