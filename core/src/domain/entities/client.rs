//! API client entity with its allow-list of sender identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered API client
///
/// A client owns zero or more allowed sender identifiers. The dispatch
/// orchestrator can optionally verify a requested sender against this
/// allow-list before invoking a backend. Deleting a client removes its
/// senders in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Identifier assigned by the store
    pub id: i64,

    /// Unique client name
    pub name: String,

    /// Sender identifiers this client may use
    pub allowed_senders: Vec<String>,

    /// Timestamp when the client was registered
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Create a new client; the id is assigned on persist
    pub fn new(name: impl Into<String>, allowed_senders: Vec<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            allowed_senders,
            created_at: Utc::now(),
        }
    }

    /// Whether the client may send as the given sender identifier
    pub fn allows_sender(&self, sender_id: &str) -> bool {
        self.allowed_senders.iter().any(|s| s == sender_id)
    }
}
