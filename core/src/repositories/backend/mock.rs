//! Mock implementation of BackendConfigRepository for testing

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::backend_config::BackendConfig;
use crate::errors::DomainError;

use super::trait_::BackendConfigRepository;

/// In-memory backend config store for tests
pub struct MockBackendConfigRepository {
    configs: Arc<RwLock<BTreeMap<String, BackendConfig>>>,
}

impl MockBackendConfigRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            configs: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Seed the store with an existing config, bypassing uniqueness checks
    pub async fn insert(&self, config: BackendConfig) {
        self.configs
            .write()
            .await
            .insert(config.name.clone(), config);
    }
}

impl Default for MockBackendConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendConfigRepository for MockBackendConfigRepository {
    async fn create(&self, config: BackendConfig) -> Result<BackendConfig, DomainError> {
        let mut configs = self.configs.write().await;
        if configs.contains_key(&config.name) {
            return Err(DomainError::Validation {
                message: format!("backend '{}' is already registered", config.name),
            });
        }
        configs.insert(config.name.clone(), config.clone());
        Ok(config)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<BackendConfig>, DomainError> {
        let configs = self.configs.read().await;
        Ok(configs.get(name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<BackendConfig>, DomainError> {
        let configs = self.configs.read().await;
        Ok(configs.values().cloned().collect())
    }

    async fn set_provisioned(&self, name: &str, provisioned: bool) -> Result<(), DomainError> {
        let mut configs = self.configs.write().await;
        let config = configs.get_mut(name).ok_or(DomainError::NotFound {
            resource: format!("backend {}", name),
        })?;
        config.provisioned = provisioned;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::backend_config::BackendKind;

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let repo = MockBackendConfigRepository::new();
        let config = BackendConfig::new("acme", BackendKind::Smpp, "10.0.0.5", 2775, "u", "p");
        repo.create(config.clone()).await.unwrap();
        let err = repo.create(config).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_set_provisioned() {
        let repo = MockBackendConfigRepository::new();
        let config = BackendConfig::new("acme", BackendKind::Smpp, "10.0.0.5", 2775, "u", "p");
        repo.create(config).await.unwrap();

        repo.set_provisioned("acme", true).await.unwrap();
        let stored = repo.find_by_name("acme").await.unwrap().unwrap();
        assert!(stored.provisioned);

        let err = repo.set_provisioned("ghost", true).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
