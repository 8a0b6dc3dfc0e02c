//! Domain entities

pub mod backend_config;
pub mod client;
pub mod otp_attempt;

pub use backend_config::{BackendConfig, BackendKind};
pub use client::Client;
pub use otp_attempt::{OtpAttempt, OtpStatus};
