//! Handlers for the provider registry endpoints

use actix_web::{web, HttpResponse};
use validator::Validate;

use od_core::domain::entities::backend_config::{BackendConfig, BackendKind};
use od_core::repositories::{AttemptRepository, BackendConfigRepository, ClientRepository};
use od_core::services::registry::ConnectorProvisioner;

use crate::dto::registry::{BackendConfigDto, RegisterBackendRequest};
use crate::handlers::error::{to_response, validation_response};
use crate::routes::AppState;

/// Register a delivery backend
///
/// SMPP-kind backends are provisioned on the gateway synchronously before
/// the call returns; a provisioning failure leaves the config registered
/// but unprovisioned, and the error is returned to the caller.
pub async fn register_provider<A, B, C, P>(
    state: web::Data<AppState<A, B, C, P>>,
    request: web::Json<RegisterBackendRequest>,
) -> HttpResponse
where
    A: AttemptRepository + 'static,
    B: BackendConfigRepository + 'static,
    C: ClientRepository + 'static,
    P: ConnectorProvisioner + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_response(&errors);
    }

    let kind: BackendKind = match request.kind.parse() {
        Ok(kind) => kind,
        Err(error) => return to_response(&error),
    };

    let mut config = BackendConfig::new(
        &request.name,
        kind,
        &request.host,
        request.port,
        &request.username,
        &request.password,
    );
    if let Some(sender_id) = &request.sender_id {
        config = config.with_sender_id(sender_id);
    }

    match state.registry_service.register_backend(config).await {
        Ok(registered) => HttpResponse::Created().json(BackendConfigDto::from(registered)),
        Err(error) => {
            tracing::error!(backend = %request.name, error = %error, "backend registration failed");
            to_response(&error)
        }
    }
}

/// List registered backends, credentials redacted
pub async fn list_providers<A, B, C, P>(state: web::Data<AppState<A, B, C, P>>) -> HttpResponse
where
    A: AttemptRepository + 'static,
    B: BackendConfigRepository + 'static,
    C: ClientRepository + 'static,
    P: ConnectorProvisioner + 'static,
{
    match state.registry_service.list_backends().await {
        Ok(backends) => {
            let rows: Vec<BackendConfigDto> =
                backends.into_iter().map(BackendConfigDto::from).collect();
            HttpResponse::Ok().json(rows)
        }
        Err(error) => to_response(&error),
    }
}

/// Re-run gateway provisioning for an existing SMPP backend
pub async fn provision_provider<A, B, C, P>(
    state: web::Data<AppState<A, B, C, P>>,
    path: web::Path<String>,
) -> HttpResponse
where
    A: AttemptRepository + 'static,
    B: BackendConfigRepository + 'static,
    C: ClientRepository + 'static,
    P: ConnectorProvisioner + 'static,
{
    let name = path.into_inner();
    match state.registry_service.provision_backend(&name).await {
        Ok(config) => HttpResponse::Ok().json(BackendConfigDto::from(config)),
        Err(error) => {
            tracing::error!(backend = %name, error = %error, "re-provisioning failed");
            to_response(&error)
        }
    }
}
