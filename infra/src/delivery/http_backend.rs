//! HTTP carrier delivery backend adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use od_core::domain::entities::backend_config::{BackendConfig, BackendKind};
use od_core::errors::DeliveryError;
use od_core::services::dispatch::{DeliveryBackend, DeliveryReceipt};
use od_shared::phone::mask_phone;

use crate::config::CarrierConfig;
use crate::InfrastructureError;

/// One message submission to the carrier API
#[derive(Debug, Serialize)]
struct SubmissionRequest<'a> {
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    message: &'a str,
}

/// Carrier response; a populated `error` field marks a failed submission
#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP carrier adapter
///
/// Issues one POST per send to the carrier's message-submission endpoint,
/// authenticated with the backend's credentials. Transport failures are
/// `BackendUnavailable`; an error status or an error indicator in the
/// response body is `TransmissionFailed`.
pub struct HttpCarrierBackend {
    client: reqwest::Client,
    scheme: String,
}

impl HttpCarrierBackend {
    /// Create a carrier adapter with the configured request timeout
    pub fn new(config: &CarrierConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            scheme: config.scheme.clone(),
        })
    }

    fn submission_url(&self, config: &BackendConfig) -> String {
        format!("{}://{}:{}/messages", self.scheme, config.host, config.port)
    }
}

#[async_trait]
impl DeliveryBackend for HttpCarrierBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Http
    }

    async fn send(
        &self,
        destination: &str,
        body: &str,
        config: &BackendConfig,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let request = SubmissionRequest {
            to: destination,
            from: config.sender_id.as_deref(),
            message: body,
        };

        let response = self
            .client
            .post(self.submission_url(config))
            .basic_auth(&config.username, Some(&config.password))
            .json(&request)
            .send()
            .await
            .map_err(|error| DeliveryError::BackendUnavailable {
                reason: error.to_string(),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| DeliveryError::BackendUnavailable {
                reason: error.to_string(),
            })?;

        if !status.is_success() {
            return Err(DeliveryError::TransmissionFailed {
                reason: format!("carrier returned {}: {}", status, text),
            });
        }

        let parsed: SubmissionResponse =
            serde_json::from_str(&text).map_err(|error| DeliveryError::TransmissionFailed {
                reason: format!("malformed carrier response: {}", error),
            })?;

        if let Some(error) = parsed.error {
            return Err(DeliveryError::TransmissionFailed {
                reason: format!("carrier error: {}", error),
            });
        }

        let receipt =
            DeliveryReceipt::generate().with_provider_message_id(parsed.message_id.unwrap_or_default());
        info!(
            backend = %config.name,
            phone = %mask_phone(destination),
            message_id = %receipt.message_id,
            "submitted message to carrier"
        );
        Ok(receipt)
    }
}
