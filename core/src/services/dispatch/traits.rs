//! Delivery backend port

use async_trait::async_trait;

use crate::domain::entities::backend_config::{BackendConfig, BackendKind};
use crate::errors::DeliveryError;

use super::types::DeliveryReceipt;

/// A delivery backend able to transmit one short message
///
/// Implementations cover the supported backend kinds: an SMPP session
/// adapter (connect, bind as transmitter, submit one message, always
/// unbind and disconnect) and an HTTP carrier adapter (one POST to the
/// carrier's submission endpoint). An adapter performs the network call
/// and nothing else - status bookkeeping belongs to the orchestrator.
#[async_trait]
pub trait DeliveryBackend: Send + Sync {
    /// The backend kind this adapter serves
    fn kind(&self) -> BackendKind;

    /// Transmit one message to `destination` through the given backend
    ///
    /// # Errors
    ///
    /// * `DeliveryError::BackendUnavailable` - the backend could not be
    ///   reached (connect/bind or transport failure)
    /// * `DeliveryError::TransmissionFailed` - the backend was reachable
    ///   but rejected or failed the send
    async fn send(
        &self,
        destination: &str,
        body: &str,
        config: &BackendConfig,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}
