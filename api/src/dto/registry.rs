//! DTOs for the provider and client registry endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

use od_core::domain::entities::backend_config::BackendConfig;
use od_core::domain::entities::client::Client;

/// Body of `POST /api/v1/providers`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBackendRequest {
    /// Unique backend name; doubles as the gateway connector id
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    /// Backend kind: "smpp" or "http"
    #[validate(length(min = 1, max = 16))]
    pub kind: String,

    /// Gateway or carrier host
    #[validate(length(min = 1, max = 255))]
    pub host: String,

    /// Gateway or carrier port
    pub port: u16,

    /// SMPP system id, or carrier API key
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    /// SMPP password, or carrier API secret
    #[validate(length(min = 1, max = 64))]
    pub password: String,

    /// Carrier sender identifier (HTTP kind)
    #[validate(length(min = 1, max = 64))]
    pub sender_id: Option<String>,
}

/// A backend config as exposed by the API, credentials redacted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfigDto {
    pub name: String,
    pub kind: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    pub provisioned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BackendConfig> for BackendConfigDto {
    fn from(config: BackendConfig) -> Self {
        Self {
            name: config.name,
            kind: config.kind.to_string(),
            host: config.host,
            port: config.port,
            username: config.username,
            sender_id: config.sender_id,
            provisioned: config.provisioned,
            created_at: config.created_at,
        }
    }
}

/// Body of `POST /api/v1/clients`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterClientRequest {
    /// Unique client name
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    /// Sender identifiers this client may use
    #[serde(default)]
    pub allowed_senders: Vec<String>,
}

/// A client as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: i64,
    pub name: String,
    pub allowed_senders: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
            allowed_senders: client.allowed_senders,
            created_at: client.created_at,
        }
    }
}
