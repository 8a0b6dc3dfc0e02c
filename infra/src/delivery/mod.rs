//! Delivery Backend Adapters
//!
//! One adapter per backend kind, each implementing the core's
//! `DeliveryBackend` port:
//!
//! - **SMPP**: session-per-send against an SMPP gateway (connect, bind as
//!   transmitter, submit one message, always unbind and disconnect)
//! - **HTTP carrier**: one POST per send to a carrier submission API
//!
//! Adapters only perform the network call; attempt bookkeeping stays with
//! the dispatch orchestrator.

use std::collections::HashMap;
use std::sync::Arc;

use od_core::domain::entities::backend_config::BackendKind;
use od_core::services::dispatch::DeliveryBackend;

use crate::config::{CarrierConfig, SmppConfig};
use crate::smpp::TcpSessionFactory;
use crate::InfrastructureError;

pub mod http_backend;
pub mod smpp_backend;

pub use http_backend::HttpCarrierBackend;
pub use smpp_backend::SmppBackend;

#[cfg(test)]
mod tests;

/// Build the adapter set the orchestrator dispatches through
///
/// Returns one adapter per supported backend kind, wired with the
/// environment-derived session and client configuration.
pub fn create_delivery_adapters(
    smpp_config: &SmppConfig,
    carrier_config: &CarrierConfig,
) -> Result<HashMap<BackendKind, Arc<dyn DeliveryBackend>>, InfrastructureError> {
    let mut adapters: HashMap<BackendKind, Arc<dyn DeliveryBackend>> = HashMap::new();
    adapters.insert(
        BackendKind::Smpp,
        Arc::new(SmppBackend::new(
            TcpSessionFactory::new(smpp_config.clone()),
            smpp_config,
        )),
    );
    adapters.insert(
        BackendKind::Http,
        Arc::new(HttpCarrierBackend::new(carrier_config)?),
    );
    Ok(adapters)
}
