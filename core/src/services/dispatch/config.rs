//! Dispatch service configuration

use serde::{Deserialize, Serialize};

/// How the inbound payload is turned into the message body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    /// Payload is a raw OTP code, wrapped in the configured body format
    Code,
    /// Payload is a complete message body, sent verbatim
    Text,
}

/// Configuration for the dispatch orchestrator
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Interpretation of the inbound payload field
    pub payload_kind: PayloadKind,

    /// Body format used when the payload is an OTP code; `{code}` is
    /// replaced with the payload
    pub otp_body_format: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            payload_kind: PayloadKind::Code,
            otp_body_format: "Your OTP is: {code}".to_string(),
        }
    }
}

impl DispatchConfig {
    /// Use freeform message bodies instead of wrapped OTP codes
    pub fn with_payload_kind(mut self, kind: PayloadKind) -> Self {
        self.payload_kind = kind;
        self
    }

    /// Override the OTP body format
    pub fn with_otp_body_format(mut self, format: impl Into<String>) -> Self {
        self.otp_body_format = format.into();
        self
    }
}
