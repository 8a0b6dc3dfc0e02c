//! Backend config registry persistence interface.

use async_trait::async_trait;

use crate::domain::entities::backend_config::BackendConfig;
use crate::errors::DomainError;

/// Repository trait for registered delivery backends
///
/// Backend configs are created through registration, read by the
/// orchestrator at dispatch time, and never auto-deleted.
#[async_trait]
pub trait BackendConfigRepository: Send + Sync {
    /// Persist a new backend config
    ///
    /// Fails with a validation error if the name is already taken.
    async fn create(&self, config: BackendConfig) -> Result<BackendConfig, DomainError>;

    /// Look up a backend config by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<BackendConfig>, DomainError>;

    /// List every registered backend config
    async fn list_all(&self) -> Result<Vec<BackendConfig>, DomainError>;

    /// Record the outcome of gateway provisioning for a backend
    ///
    /// Returns `NotFound` if no backend with the given name exists.
    async fn set_provisioned(&self, name: &str, provisioned: bool) -> Result<(), DomainError>;
}
