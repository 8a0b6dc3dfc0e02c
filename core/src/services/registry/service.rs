//! Registry service implementation

use std::sync::Arc;
use tracing;

use crate::domain::entities::backend_config::{BackendConfig, BackendKind};
use crate::domain::entities::client::Client;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BackendConfigRepository, ClientRepository};

use super::traits::ConnectorProvisioner;

/// Manages registered backends, their gateway provisioning, and clients
pub struct RegistryService<B, C, P>
where
    B: BackendConfigRepository,
    C: ClientRepository,
    P: ConnectorProvisioner,
{
    backends: Arc<B>,
    clients: Arc<C>,
    provisioner: Arc<P>,
}

impl<B, C, P> RegistryService<B, C, P>
where
    B: BackendConfigRepository,
    C: ClientRepository,
    P: ConnectorProvisioner,
{
    /// Create a new registry service
    pub fn new(backends: Arc<B>, clients: Arc<C>, provisioner: Arc<P>) -> Self {
        Self {
            backends,
            clients,
            provisioner,
        }
    }

    /// Register a delivery backend
    ///
    /// The config row is committed first; SMPP-kind backends are then
    /// provisioned on the gateway synchronously before the call returns.
    /// If provisioning fails the row is retained with `provisioned = false`
    /// as an operator-inspectable marker (dispatch against it is rejected)
    /// and the provisioning error is returned. HTTP backends need no
    /// gateway setup and are marked provisioned immediately.
    pub async fn register_backend(&self, config: BackendConfig) -> DomainResult<BackendConfig> {
        let mut config = BackendConfig {
            provisioned: false,
            ..config
        };
        config = self.backends.create(config).await?;

        tracing::info!(
            backend = %config.name,
            kind = %config.kind,
            "registered delivery backend"
        );

        match config.kind {
            BackendKind::Http => {
                self.backends.set_provisioned(&config.name, true).await?;
                config.provisioned = true;
            }
            BackendKind::Smpp => {
                self.provision_connector(&mut config).await?;
            }
        }

        Ok(config)
    }

    /// Re-run gateway provisioning for an existing SMPP backend
    ///
    /// Recovery path for registrations whose provisioning failed; the
    /// command sequence is idempotent on the gateway, so repeating it for
    /// an already-provisioned connector is harmless.
    pub async fn provision_backend(&self, name: &str) -> DomainResult<BackendConfig> {
        let mut config = self
            .backends
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("backend {}", name),
            })?;

        if config.kind != BackendKind::Smpp {
            return Err(DomainError::Validation {
                message: format!("backend '{}' is not an SMPP connector", name),
            });
        }

        self.provision_connector(&mut config).await?;
        Ok(config)
    }

    /// List every registered backend config
    pub async fn list_backends(&self) -> DomainResult<Vec<BackendConfig>> {
        self.backends.list_all().await
    }

    /// Register a client with its allowed sender identifiers
    pub async fn register_client(
        &self,
        name: impl Into<String>,
        allowed_senders: Vec<String>,
    ) -> DomainResult<Client> {
        let client = self.clients.create(Client::new(name, allowed_senders)).await?;
        tracing::info!(client = %client.name, senders = client.allowed_senders.len(), "registered client");
        Ok(client)
    }

    /// Remove a client, cascade-deleting its allowed senders
    pub async fn remove_client(&self, name: &str) -> DomainResult<()> {
        if !self.clients.delete_by_name(name).await? {
            return Err(DomainError::NotFound {
                resource: format!("client {}", name),
            });
        }
        tracing::info!(client = %name, "removed client and its allowed senders");
        Ok(())
    }

    /// List every client with its allowed senders
    pub async fn list_clients(&self) -> DomainResult<Vec<Client>> {
        self.clients.list_all().await
    }

    /// Whether the named client may send as the given sender identifier
    pub async fn is_sender_allowed(&self, client_name: &str, sender_id: &str) -> DomainResult<bool> {
        let client = self
            .clients
            .find_by_name(client_name)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("client {}", client_name),
            })?;
        Ok(client.allows_sender(sender_id))
    }

    /// Drive gateway provisioning and record its outcome
    async fn provision_connector(&self, config: &mut BackendConfig) -> DomainResult<()> {
        match self.provisioner.provision(config).await {
            Ok(()) => {
                self.backends.set_provisioned(&config.name, true).await?;
                config.provisioned = true;
                tracing::info!(backend = %config.name, "gateway connector provisioned");
                Ok(())
            }
            Err(error) => {
                tracing::error!(
                    backend = %config.name,
                    error = %error,
                    "gateway connector provisioning failed; config retained unprovisioned"
                );
                Err(error.into())
            }
        }
    }
}
