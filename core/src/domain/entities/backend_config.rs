//! Registered delivery backend configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The kind of delivery backend a config describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// SMPP gateway connector (bind-transmitter, submit, unbind per send)
    Smpp,
    /// HTTP carrier message-submission API
    Http,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Smpp => "smpp",
            BackendKind::Http => "http",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smpp" => Ok(BackendKind::Smpp),
            "http" => Ok(BackendKind::Http),
            other => Err(DomainError::Validation {
                message: format!("unrecognized backend kind '{}'", other),
            }),
        }
    }
}

/// A registered delivery backend
///
/// SMPP-kind backends start out unprovisioned; the registry provisions the
/// gateway connector at registration time and flips `provisioned` on
/// success. An unprovisioned SMPP backend is kept for operator inspection
/// but rejected at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Unique registry key, doubles as the gateway connector name
    pub name: String,

    /// Backend kind
    pub kind: BackendKind,

    /// Gateway or carrier host
    pub host: String,

    /// Gateway or carrier port
    pub port: u16,

    /// SMPP system id, or carrier API key
    pub username: String,

    /// SMPP password, or carrier API secret
    pub password: String,

    /// Carrier sender identifier (HTTP kind only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,

    /// Whether gateway provisioning completed for this backend
    pub provisioned: bool,

    /// Timestamp when the backend was registered
    pub created_at: DateTime<Utc>,
}

impl BackendConfig {
    /// Create a new, not-yet-provisioned backend config
    pub fn new(
        name: impl Into<String>,
        kind: BackendKind,
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            sender_id: None,
            provisioned: false,
            created_at: Utc::now(),
        }
    }

    /// Set the carrier sender identifier
    pub fn with_sender_id(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    /// Whether the orchestrator may dispatch through this backend
    ///
    /// HTTP backends need no gateway-side setup; SMPP backends must have
    /// been provisioned first.
    pub fn is_dispatchable(&self) -> bool {
        match self.kind {
            BackendKind::Http => true,
            BackendKind::Smpp => self.provisioned,
        }
    }
}
