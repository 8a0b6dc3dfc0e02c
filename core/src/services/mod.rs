//! Business services containing domain logic and use cases.

pub mod dispatch;
pub mod registry;

// Re-export commonly used types
pub use dispatch::{
    DeliveryBackend, DeliveryReceipt, DispatchConfig, DispatchOutcome, DispatchService,
    OtpSendRequest, PayloadKind, SenderAuthorization,
};
pub use registry::{ConnectorProvisioner, RegistryService};
