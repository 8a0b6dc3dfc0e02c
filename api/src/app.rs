//! Application factory
//!
//! Builds the actix-web application with all routes and middleware wired
//! to the injected services.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use od_core::repositories::{AttemptRepository, BackendConfigRepository, ClientRepository};
use od_core::services::registry::ConnectorProvisioner;

use crate::middleware::cors::create_cors;
use crate::routes::otp::{history, send};
use crate::routes::registry::{clients, providers};
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<A, B, C, P>(
    app_state: web::Data<AppState<A, B, C, P>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<
                tracing_actix_web::StreamSpan<actix_web::body::BoxBody>,
            >,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AttemptRepository + 'static,
    B: BackendConfigRepository + 'static,
    C: ClientRepository + 'static,
    P: ConnectorProvisioner + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/otp")
                        .route("/send", web::post().to(send::send_otp::<A, B, C, P>))
                        .route("/history", web::get().to(history::history::<A, B, C, P>)),
                )
                .service(
                    web::scope("/providers")
                        .route("", web::post().to(providers::register_provider::<A, B, C, P>))
                        .route("", web::get().to(providers::list_providers::<A, B, C, P>))
                        .route(
                            "/{name}/provision",
                            web::post().to(providers::provision_provider::<A, B, C, P>),
                        ),
                )
                .service(
                    web::scope("/clients")
                        .route("", web::post().to(clients::register_client::<A, B, C, P>))
                        .route("", web::get().to(clients::list_clients::<A, B, C, P>))
                        .route("/{name}", web::delete().to(clients::remove_client::<A, B, C, P>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "otp-dispatch-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
