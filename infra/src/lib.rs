//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the OtpDispatch
//! application. It provides concrete implementations for the ports the
//! core defines: MySQL persistence, the SMPP wire session, the delivery
//! backend adapters, and the gateway provisioning console client.
//!
//! ## Architecture
//!
//! - **Database**: MySQL repositories using SQLx
//! - **SMPP**: minimal v3.4 transmitter session (bind, submit, unbind)
//! - **Delivery**: one adapter per backend kind (SMPP, HTTP carrier)
//! - **Provisioning**: jcli management-console client

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Delivery backend adapters
pub mod delivery;

/// Gateway provisioning console client
pub mod provisioning;

/// SMPP wire protocol session
pub mod smpp;

/// Configuration for infrastructure services
pub mod config {
    //! Environment-driven configuration for the outbound integrations:
    //! SMPP session defaults, the provisioning console, and the HTTP
    //! carrier client.

    use serde::{Deserialize, Serialize};

    /// SMPP session configuration shared by every SMPP send
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SmppConfig {
        /// Caller-independent source address placed on every message
        pub source_addr: String,
        /// Timeout for each network operation, in seconds
        pub timeout_secs: u64,
    }

    impl Default for SmppConfig {
        fn default() -> Self {
            Self {
                source_addr: "OTPService".to_string(),
                timeout_secs: 10,
            }
        }
    }

    impl SmppConfig {
        /// Create from environment variables
        pub fn from_env() -> Self {
            Self {
                source_addr: std::env::var("SMPP_SOURCE_ADDR")
                    .unwrap_or_else(|_| "OTPService".to_string()),
                timeout_secs: std::env::var("SMPP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            }
        }
    }

    /// Gateway management-console configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ProvisioningConfig {
        /// Console host
        pub host: String,
        /// Console port
        pub port: u16,
        /// Console login
        pub username: String,
        /// Console password
        pub password: String,
        /// Timeout for connect and each prompt read, in seconds
        pub timeout_secs: u64,
    }

    impl Default for ProvisioningConfig {
        fn default() -> Self {
            Self {
                host: "127.0.0.1".to_string(),
                port: 8990,
                username: "jcliadmin".to_string(),
                password: "jclipwd".to_string(),
                timeout_secs: 5,
            }
        }
    }

    impl ProvisioningConfig {
        /// Create from environment variables
        pub fn from_env() -> Self {
            let defaults = Self::default();
            Self {
                host: std::env::var("PROVISIONING_HOST").unwrap_or(defaults.host),
                port: std::env::var("PROVISIONING_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.port),
                username: std::env::var("PROVISIONING_USERNAME").unwrap_or(defaults.username),
                password: std::env::var("PROVISIONING_PASSWORD").unwrap_or(defaults.password),
                timeout_secs: std::env::var("PROVISIONING_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timeout_secs),
            }
        }
    }

    /// HTTP carrier client configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CarrierConfig {
        /// URL scheme for the carrier submission endpoint
        pub scheme: String,
        /// Timeout for each submission request, in seconds
        pub timeout_secs: u64,
    }

    impl Default for CarrierConfig {
        fn default() -> Self {
            Self {
                scheme: "https".to_string(),
                timeout_secs: 30,
            }
        }
    }

    impl CarrierConfig {
        /// Create from environment variables
        pub fn from_env() -> Self {
            let defaults = Self::default();
            Self {
                scheme: std::env::var("CARRIER_SCHEME").unwrap_or(defaults.scheme),
                timeout_secs: std::env::var("CARRIER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timeout_secs),
            }
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for carrier APIs
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Socket-level error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMPP protocol error
    #[error("SMPP error: {0}")]
    Smpp(String),

    /// Gateway console error
    #[error("Provisioning error: {0}")]
    Provisioning(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
