//! Handlers for the client registry endpoints

use actix_web::{web, HttpResponse};
use validator::Validate;

use od_core::repositories::{AttemptRepository, BackendConfigRepository, ClientRepository};
use od_core::services::registry::ConnectorProvisioner;

use crate::dto::registry::{ClientDto, RegisterClientRequest};
use crate::handlers::error::{to_response, validation_response};
use crate::routes::AppState;

/// Register a client with its allowed sender identifiers
pub async fn register_client<A, B, C, P>(
    state: web::Data<AppState<A, B, C, P>>,
    request: web::Json<RegisterClientRequest>,
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

    match state
        .registry_service
        .register_client(&request.name, request.allowed_senders.clone())
        .await
    {
        Ok(client) => HttpResponse::Created().json(ClientDto::from(client)),
        Err(error) => to_response(&error),
    }
}

/// List registered clients with their allowed senders
pub async fn list_clients<A, B, C, P>(state: web::Data<AppState<A, B, C, P>>) -> HttpResponse
where
    A: AttemptRepository + 'static,
    B: BackendConfigRepository + 'static,
    C: ClientRepository + 'static,
    P: ConnectorProvisioner + 'static,
{
    match state.registry_service.list_clients().await {
        Ok(clients) => {
            let rows: Vec<ClientDto> = clients.into_iter().map(ClientDto::from).collect();
            HttpResponse::Ok().json(rows)
        }
        Err(error) => to_response(&error),
    }
}

/// Remove a client, cascade-deleting its allowed senders
pub async fn remove_client<A, B, C, P>(
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
    match state.registry_service.remove_client(&name).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => to_response(&error),
    }
}
