//! Main dispatch orchestrator implementation

use std::collections::HashMap;
use std::sync::Arc;
use tracing;

use od_shared::phone::mask_phone;

use crate::domain::entities::backend_config::{BackendConfig, BackendKind};
use crate::domain::entities::otp_attempt::{OtpAttempt, OtpStatus};
use crate::errors::{DeliveryError, DomainError, DomainResult};
use crate::repositories::{AttemptRepository, BackendConfigRepository, ClientRepository};

use super::config::{DispatchConfig, PayloadKind};
use super::traits::DeliveryBackend;
use super::types::{DispatchOutcome, OtpSendRequest};

/// Orchestrates OTP delivery across heterogeneous backends
///
/// Per request it resolves the backend config, optionally authorizes the
/// sender, records the attempt, invokes the matching adapter, and tracks
/// the status lifecycle. Requests are independent: the only shared mutable
/// state is each request's own attempt record, and no retry is performed -
/// one inbound request triggers exactly one delivery attempt.
pub struct DispatchService<A, B, C>
where
    A: AttemptRepository,
    B: BackendConfigRepository,
    C: ClientRepository,
{
    /// Delivery status store
    attempts: Arc<A>,
    /// Registered backend configs
    backends: Arc<B>,
    /// Clients with sender allow-lists
    clients: Arc<C>,
    /// One adapter per backend kind
    adapters: HashMap<BackendKind, Arc<dyn DeliveryBackend>>,
    /// Service configuration
    config: DispatchConfig,
}

impl<A, B, C> DispatchService<A, B, C>
where
    A: AttemptRepository,
    B: BackendConfigRepository,
    C: ClientRepository,
{
    /// Create a new dispatch service
    pub fn new(
        attempts: Arc<A>,
        backends: Arc<B>,
        clients: Arc<C>,
        adapters: HashMap<BackendKind, Arc<dyn DeliveryBackend>>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            attempts,
            backends,
            clients,
            adapters,
            config,
        }
    }

    /// Dispatch one OTP send request
    ///
    /// Exactly one `OtpAttempt` is created once a dispatchable backend has
    /// been resolved and the sender authorized; the record then advances
    /// `pending -> sent -> delivered` on success or `-> failed` on any
    /// adapter error, and the error is re-raised to the caller with the
    /// adapter's reason attached.
    ///
    /// `delivered` here means "accepted for transmission": none of the
    /// backends report an asynchronous carrier delivery receipt.
    pub async fn dispatch(&self, request: OtpSendRequest) -> DomainResult<DispatchOutcome> {
        // 1. Resolve the backend; unknown providers fail before any record
        //    is written.
        let backend = self
            .backends
            .find_by_name(&request.provider)
            .await?
            .ok_or_else(|| DeliveryError::UnknownProvider {
                provider: request.provider.clone(),
            })?;

        // 2. Optional sender authorization against the client allow-list.
        self.authorize(&request).await?;

        // 3. Record the attempt in `pending`.
        let mut attempt = self
            .attempts
            .create(OtpAttempt::new(
                &request.provider,
                &request.phone_number,
                &request.payload,
            ))
            .await?;

        tracing::info!(
            attempt_id = attempt.id,
            provider = %backend.name,
            phone = %mask_phone(&request.phone_number),
            "created otp attempt"
        );

        // 4. An SMPP backend whose connector never provisioned is kept in
        //    the registry for inspection but cannot be dispatched through.
        if !backend.is_dispatchable() {
            let error = DeliveryError::BackendUnavailable {
                reason: format!("connector '{}' is not provisioned", backend.name),
            };
            self.mark_failed(attempt.id).await;
            return Err(error.into());
        }

        let body = self.message_body(&request.payload);
        let adapter = self.adapter_for(&backend)?;

        // 5. One transmission, no retry.
        match adapter.send(&request.phone_number, &body, &backend).await {
            Ok(receipt) => {
                self.attempts.update_status(attempt.id, OtpStatus::Sent).await?;
                self.attempts
                    .update_status(attempt.id, OtpStatus::Delivered)
                    .await?;
                attempt.status = OtpStatus::Delivered;

                tracing::info!(
                    attempt_id = attempt.id,
                    provider = %backend.name,
                    message_id = %receipt.message_id,
                    "otp accepted for transmission"
                );

                Ok(DispatchOutcome { attempt, receipt })
            }
            Err(error) => {
                tracing::error!(
                    attempt_id = attempt.id,
                    provider = %backend.name,
                    error = %error,
                    "otp delivery failed"
                );
                self.mark_failed(attempt.id).await;
                Err(error.into())
            }
        }
    }

    /// Full attempt history, ordered by creation, all statuses included
    pub async fn history(&self) -> DomainResult<Vec<OtpAttempt>> {
        self.attempts.list_all().await
    }

    /// Verify the requested sender against the client's allow-list
    async fn authorize(&self, request: &OtpSendRequest) -> DomainResult<()> {
        let Some(auth) = &request.authorization else {
            return Ok(());
        };

        let client = self
            .clients
            .find_by_name(&auth.client_name)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("client {}", auth.client_name),
            })?;

        if !client.allows_sender(&auth.sender_id) {
            tracing::warn!(
                client = %auth.client_name,
                sender = %auth.sender_id,
                "sender not in client allow-list"
            );
            return Err(DomainError::SenderNotAllowed {
                client: auth.client_name.clone(),
                sender: auth.sender_id.clone(),
            });
        }

        Ok(())
    }

    /// Build the message body from the inbound payload
    fn message_body(&self, payload: &str) -> String {
        match self.config.payload_kind {
            PayloadKind::Code => self.config.otp_body_format.replace("{code}", payload),
            PayloadKind::Text => payload.to_string(),
        }
    }

    /// Look up the adapter serving the backend's kind
    fn adapter_for(&self, backend: &BackendConfig) -> DomainResult<Arc<dyn DeliveryBackend>> {
        self.adapters
            .get(&backend.kind)
            .cloned()
            .ok_or_else(|| DomainError::Internal {
                message: format!("no delivery adapter registered for kind '{}'", backend.kind),
            })
    }

    /// Transition an attempt to `failed`
    ///
    /// A store error on this path is logged and dropped so the original
    /// delivery error still reaches the caller.
    async fn mark_failed(&self, attempt_id: i64) {
        if let Err(error) = self.attempts.update_status(attempt_id, OtpStatus::Failed).await {
            tracing::error!(
                attempt_id = attempt_id,
                error = %error,
                "failed to mark attempt as failed"
            );
        }
    }
}
