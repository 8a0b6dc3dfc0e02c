use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use od_api::app::create_app;
use od_api::routes::AppState;
use od_core::services::dispatch::{DispatchConfig, DispatchService, PayloadKind};
use od_core::services::registry::RegistryService;
use od_infra::config::{CarrierConfig, ProvisioningConfig, SmppConfig};
use od_infra::database::{
    create_pool, MySqlAttemptRepository, MySqlBackendConfigRepository, MySqlClientRepository,
};
use od_infra::delivery::create_delivery_adapters;
use od_infra::provisioning::JcliProvisioner;
use od_shared::config::{DatabaseConfig, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("starting OtpDispatch API server");

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let smpp_config = SmppConfig::from_env();
    let carrier_config = CarrierConfig::from_env();
    let provisioning_config = ProvisioningConfig::from_env();
    let dispatch_config = dispatch_config_from_env();

    let pool = create_pool(&database_config).await?;

    let attempts = Arc::new(MySqlAttemptRepository::new(pool.clone()));
    let backends = Arc::new(MySqlBackendConfigRepository::new(pool.clone()));
    let clients = Arc::new(MySqlClientRepository::new(pool));

    let adapters = create_delivery_adapters(&smpp_config, &carrier_config)?;
    let provisioner = Arc::new(JcliProvisioner::new(provisioning_config));

    let dispatch_service = Arc::new(DispatchService::new(
        attempts,
        backends.clone(),
        clients.clone(),
        adapters,
        dispatch_config,
    ));
    let registry_service = Arc::new(RegistryService::new(backends, clients, provisioner));

    let app_state = web::Data::new(AppState {
        dispatch_service,
        registry_service,
    });

    let bind_address = server_config.bind_address();
    info!(address = %bind_address, "binding HTTP server");

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}

/// Build the dispatch configuration from the environment
fn dispatch_config_from_env() -> DispatchConfig {
    let mut config = DispatchConfig::default();
    if let Ok(kind) = std::env::var("OTP_PAYLOAD_KIND") {
        match kind.as_str() {
            "text" => config = config.with_payload_kind(PayloadKind::Text),
            "code" => config = config.with_payload_kind(PayloadKind::Code),
            other => {
                tracing::warn!(value = %other, "unrecognized OTP_PAYLOAD_KIND, using 'code'");
            }
        }
    }
    if let Ok(format) = std::env::var("OTP_BODY_FORMAT") {
        config = config.with_otp_body_format(format);
    }
    config
}
