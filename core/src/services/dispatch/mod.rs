//! OTP dispatch orchestrator
//!
//! Owns the delivery lifecycle of a send request: resolve the backend,
//! record the attempt, invoke the delivery adapter, and track the status
//! through `pending -> sent -> delivered` or `-> failed`.

pub mod config;
pub mod service;
pub mod traits;
pub mod types;

pub use config::{DispatchConfig, PayloadKind};
pub use service::DispatchService;
pub use traits::DeliveryBackend;
pub use types::{DeliveryReceipt, DispatchOutcome, OtpSendRequest, SenderAuthorization};

#[cfg(test)]
mod tests;
