//! Mock implementation of ClientRepository for testing

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::client::Client;
use crate::errors::DomainError;

use super::trait_::ClientRepository;

/// In-memory client store for tests
///
/// A client and its senders live in one map entry, so removal is atomic by
/// construction - the mock cannot exhibit the partial-delete state the
/// transactional MySQL implementation guards against.
pub struct MockClientRepository {
    clients: Arc<RwLock<BTreeMap<String, Client>>>,
    next_id: AtomicI64,
}

impl MockClientRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MockClientRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn create(&self, mut client: Client) -> Result<Client, DomainError> {
        let mut clients = self.clients.write().await;
        if clients.contains_key(&client.name) {
            return Err(DomainError::Validation {
                message: format!("client '{}' is already registered", client.name),
            });
        }
        client.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        clients.insert(client.name.clone(), client.clone());
        Ok(client)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Client>, DomainError> {
        let clients = self.clients.read().await;
        Ok(clients.get(name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Client>, DomainError> {
        let clients = self.clients.read().await;
        Ok(clients.values().cloned().collect())
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let mut clients = self.clients.write().await;
        Ok(clients.remove(name).is_some())
    }
}
