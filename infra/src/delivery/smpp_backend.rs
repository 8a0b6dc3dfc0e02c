//! SMPP delivery backend adapter

use async_trait::async_trait;
use tracing::{info, warn};

use od_core::domain::entities::backend_config::{BackendConfig, BackendKind};
use od_core::errors::DeliveryError;
use od_core::services::dispatch::{DeliveryBackend, DeliveryReceipt};
use od_shared::phone::mask_phone;

use crate::config::SmppConfig;
use crate::smpp::{SmppSession, SmppSessionFactory};

/// Session-per-send SMPP adapter
///
/// Each send opens its own session against the backend's gateway: connect,
/// bind as transmitter, submit exactly one message, then unbind and
/// disconnect. The teardown runs exactly once per opened session, whether
/// bind or submit succeeded or failed. No session is shared or pooled, so
/// concurrent sends hold concurrent independent sessions.
pub struct SmppBackend<F: SmppSessionFactory> {
    factory: F,
    source_addr: String,
}

impl<F: SmppSessionFactory> SmppBackend<F> {
    /// Create an SMPP adapter using the given session factory
    pub fn new(factory: F, config: &SmppConfig) -> Self {
        Self {
            factory,
            source_addr: config.source_addr.clone(),
        }
    }

    async fn teardown(&self, session: &mut F::Session) {
        if let Err(error) = session.close().await {
            warn!(error = %error, "smpp session teardown failed");
        }
    }
}

#[async_trait]
impl<F> DeliveryBackend for SmppBackend<F>
where
    F: SmppSessionFactory + 'static,
{
    fn kind(&self) -> BackendKind {
        BackendKind::Smpp
    }

    async fn send(
        &self,
        destination: &str,
        body: &str,
        config: &BackendConfig,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let mut session = self
            .factory
            .connect(&config.host, config.port)
            .await
            .map_err(|error| DeliveryError::BackendUnavailable {
                reason: error.to_string(),
            })?;

        if let Err(error) = session
            .bind_transmitter(&config.username, &config.password)
            .await
        {
            self.teardown(&mut session).await;
            return Err(DeliveryError::BackendUnavailable {
                reason: error.to_string(),
            });
        }

        let result = session.submit(&self.source_addr, destination, body).await;
        self.teardown(&mut session).await;

        match result {
            Ok(provider_message_id) => {
                let receipt =
                    DeliveryReceipt::generate().with_provider_message_id(provider_message_id);
                info!(
                    backend = %config.name,
                    phone = %mask_phone(destination),
                    message_id = %receipt.message_id,
                    "submitted message over smpp"
                );
                Ok(receipt)
            }
            Err(error) => Err(DeliveryError::TransmissionFailed {
                reason: error.to_string(),
            }),
        }
    }
}
