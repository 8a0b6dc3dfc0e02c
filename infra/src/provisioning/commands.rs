//! Console command sequence for connector provisioning

use od_core::domain::entities::backend_config::BackendConfig;

/// Build the ordered command sequence that provisions one connector
///
/// The order is load-bearing: the connector must exist before its
/// parameters can be set, and every parameter must be applied before the
/// trailing activate-all command. Re-issuing the same sequence for an
/// existing connector is accepted by the gateway, which makes
/// re-provisioning safe.
pub fn provisioning_commands(config: &BackendConfig) -> Vec<String> {
    vec![
        format!("smppccm -a {}", config.name),
        format!("smppccm -u {} -p host {}", config.name, config.host),
        format!("smppccm -u {} -p port {}", config.name, config.port),
        format!("smppccm -u {} -p username {}", config.name, config.username),
        format!("smppccm -u {} -p password {}", config.name, config.password),
        "smppccm -1".to_string(),
    ]
}
