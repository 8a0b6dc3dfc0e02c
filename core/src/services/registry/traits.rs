//! Connector provisioning port

use async_trait::async_trait;

use crate::domain::entities::backend_config::BackendConfig;
use crate::errors::DeliveryError;

/// Provisions a named connector on the external SMPP gateway
///
/// Invoked once per SMPP backend registration, before the backend becomes
/// dispatchable. The command sequence issued by an implementation must be
/// idempotent on the gateway side: re-provisioning the same connector may
/// repeat it without corrupting gateway state.
#[async_trait]
pub trait ConnectorProvisioner: Send + Sync {
    /// Create, configure, and activate the connector for this backend
    ///
    /// # Errors
    ///
    /// `DeliveryError::Provisioning` wrapping the underlying transport
    /// error if the gateway console cannot be reached or a command fails.
    async fn provision(&self, config: &BackendConfig) -> Result<(), DeliveryError>;
}
