//! Client and allowed-sender persistence interface.

use async_trait::async_trait;

use crate::domain::entities::client::Client;
use crate::errors::DomainError;

/// Repository trait for API clients and their sender allow-lists
///
/// A client and its allowed senders form one aggregate: creation persists
/// both in a single transaction, and deletion cascades to the senders
/// within the same transaction boundary - both succeed or both fail.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Persist a client together with its allowed senders
    async fn create(&self, client: Client) -> Result<Client, DomainError>;

    /// Look up a client (with senders) by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Client>, DomainError>;

    /// List every client with its allowed senders
    async fn list_all(&self) -> Result<Vec<Client>, DomainError>;

    /// Delete a client and cascade-delete its allowed senders
    ///
    /// Returns `Ok(true)` if the client existed, `Ok(false)` otherwise.
    async fn delete_by_name(&self, name: &str) -> Result<bool, DomainError>;
}
