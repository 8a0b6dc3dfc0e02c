//! jcli management-console client

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use od_core::domain::entities::backend_config::BackendConfig;
use od_core::errors::DeliveryError;
use od_core::services::registry::ConnectorProvisioner;

use crate::config::ProvisioningConfig;
use crate::provisioning::commands::provisioning_commands;
use crate::InfrastructureError;

/// Prompt sentinel the console prints when ready for the next command
const PROMPT: &[u8] = b"jcli : ";

const USERNAME_PROMPT: &[u8] = b"Username:";
const PASSWORD_PROMPT: &[u8] = b"Password:";

/// Connector provisioner speaking the gateway's jcli console protocol
///
/// Connects, authenticates, then issues the fixed `smppccm` command
/// sequence, waiting for the prompt sentinel after each line.
pub struct JcliProvisioner {
    config: ProvisioningConfig,
}

impl JcliProvisioner {
    /// Create a provisioner for the configured console
    pub fn new(config: ProvisioningConfig) -> Self {
        Self { config }
    }

    fn io_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    async fn run(&self, backend: &BackendConfig) -> Result<(), InfrastructureError> {
        let address = format!("{}:{}", self.config.host, self.config.port);
        let mut stream = timeout(self.io_timeout(), TcpStream::connect(&address))
            .await
            .map_err(|_| {
                InfrastructureError::Provisioning(format!("connect to {} timed out", address))
            })??;

        debug!(address = %address, "connected to gateway console");

        // Console login, then wait for the first command prompt
        self.read_until(&mut stream, USERNAME_PROMPT).await?;
        self.write_line(&mut stream, &self.config.username).await?;
        self.read_until(&mut stream, PASSWORD_PROMPT).await?;
        self.write_line(&mut stream, &self.config.password).await?;
        self.read_until(&mut stream, PROMPT).await?;

        for command in provisioning_commands(backend) {
            debug!(command = %command, "issuing console command");
            self.write_line(&mut stream, &command).await?;
            self.read_until(&mut stream, PROMPT).await?;
        }

        let _ = stream.shutdown().await;

        info!(connector = %backend.name, "gateway connector provisioned via console");
        Ok(())
    }

    async fn write_line(
        &self,
        stream: &mut TcpStream,
        line: &str,
    ) -> Result<(), InfrastructureError> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        timeout(self.io_timeout(), stream.write_all(&bytes))
            .await
            .map_err(|_| InfrastructureError::Provisioning("console write timed out".to_string()))??;
        Ok(())
    }

    /// Read console output until `needle` appears or the timeout elapses
    async fn read_until(
        &self,
        stream: &mut TcpStream,
        needle: &[u8],
    ) -> Result<Vec<u8>, InfrastructureError> {
        let mut output = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = timeout(self.io_timeout(), stream.read(&mut chunk))
                .await
                .map_err(|_| {
                    InfrastructureError::Provisioning(format!(
                        "timed out waiting for console prompt {:?}",
                        String::from_utf8_lossy(needle)
                    ))
                })??;
            if read == 0 {
                return Err(InfrastructureError::Provisioning(
                    "console closed the connection".to_string(),
                ));
            }
            output.extend_from_slice(&chunk[..read]);
            if output.windows(needle.len()).any(|window| window == needle) {
                return Ok(output);
            }
        }
    }
}

#[async_trait]
impl ConnectorProvisioner for JcliProvisioner {
    async fn provision(&self, config: &BackendConfig) -> Result<(), DeliveryError> {
        self.run(config).await.map_err(|error| DeliveryError::Provisioning {
            reason: error.to_string(),
        })
    }
}
