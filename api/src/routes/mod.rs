//! API routes and shared application state

pub mod otp;
pub mod registry;

use std::sync::Arc;

use od_core::repositories::{AttemptRepository, BackendConfigRepository, ClientRepository};
use od_core::services::dispatch::DispatchService;
use od_core::services::registry::{ConnectorProvisioner, RegistryService};

/// Application state that holds the shared services
pub struct AppState<A, B, C, P>
where
    A: AttemptRepository,
    B: BackendConfigRepository,
    C: ClientRepository,
    P: ConnectorProvisioner,
{
    pub dispatch_service: Arc<DispatchService<A, B, C>>,
    pub registry_service: Arc<RegistryService<B, C, P>>,
}
