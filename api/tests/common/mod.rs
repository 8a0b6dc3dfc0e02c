//! Shared fixtures for route tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use actix_web::web;

use od_api::routes::AppState;
use od_core::domain::entities::backend_config::{BackendConfig, BackendKind};
use od_core::errors::DeliveryError;
use od_core::repositories::{
    MockAttemptRepository, MockBackendConfigRepository, MockClientRepository,
};
use od_core::services::dispatch::{
    DeliveryBackend, DeliveryReceipt, DispatchConfig, DispatchService,
};
use od_core::services::registry::{ConnectorProvisioner, RegistryService};

/// Delivery backend stub with a scripted outcome
pub struct StubBackend {
    kind: BackendKind,
    fail: bool,
}

#[async_trait]
impl DeliveryBackend for StubBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn send(
        &self,
        _destination: &str,
        _body: &str,
        _config: &BackendConfig,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        if self.fail {
            return Err(DeliveryError::TransmissionFailed {
                reason: "submit rejected by gateway".to_string(),
            });
        }
        Ok(DeliveryReceipt::generate())
    }
}

/// Connector provisioner stub
pub struct StubProvisioner {
    fail: bool,
}

#[async_trait]
impl ConnectorProvisioner for StubProvisioner {
    async fn provision(&self, _config: &BackendConfig) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Provisioning {
                reason: "console unreachable".to_string(),
            });
        }
        Ok(())
    }
}

pub type TestState =
    AppState<MockAttemptRepository, MockBackendConfigRepository, MockClientRepository, StubProvisioner>;

/// Build application state over mock ports
///
/// Seeds one provisioned SMPP backend named "acme". `send_fails` scripts
/// the delivery adapters, `provisioning_fails` scripts the provisioner.
pub async fn test_state(send_fails: bool, provisioning_fails: bool) -> web::Data<TestState> {
    let attempts = Arc::new(MockAttemptRepository::new());
    let backends = Arc::new(MockBackendConfigRepository::new());
    let clients = Arc::new(MockClientRepository::new());

    let mut acme = BackendConfig::new("acme", BackendKind::Smpp, "10.0.0.5", 2775, "u", "p");
    acme.provisioned = true;
    backends.insert(acme).await;

    let mut adapters: HashMap<BackendKind, Arc<dyn DeliveryBackend>> = HashMap::new();
    adapters.insert(
        BackendKind::Smpp,
        Arc::new(StubBackend {
            kind: BackendKind::Smpp,
            fail: send_fails,
        }),
    );
    adapters.insert(
        BackendKind::Http,
        Arc::new(StubBackend {
            kind: BackendKind::Http,
            fail: send_fails,
        }),
    );

    let dispatch_service = Arc::new(DispatchService::new(
        attempts,
        backends.clone(),
        clients.clone(),
        adapters,
        DispatchConfig::default(),
    ));
    let registry_service = Arc::new(RegistryService::new(
        backends,
        clients,
        Arc::new(StubProvisioner {
            fail: provisioning_fails,
        }),
    ));

    web::Data::new(AppState {
        dispatch_service,
        registry_service,
    })
}
