//! TCP-backed SMPP transmitter session

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::SmppConfig;
use crate::smpp::pdu::{self, PduHeader};
use crate::smpp::{SmppSession, SmppSessionFactory};
use crate::InfrastructureError;

// Upper bound on an accepted PDU; anything larger indicates a framing
// error rather than a legitimate response to a transmitter.
const MAX_PDU_LEN: u32 = 64 * 1024;

/// One TCP session against an SMPP gateway
///
/// Every network operation runs under the configured timeout so a stalled
/// gateway blocks only the one request holding this session.
pub struct TcpSmppSession {
    stream: TcpStream,
    timeout: Duration,
    sequence: u32,
}

impl TcpSmppSession {
    /// Connect to the gateway
    pub async fn connect(
        host: &str,
        port: u16,
        io_timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let address = format!("{}:{}", host, port);
        let stream = timeout(io_timeout, TcpStream::connect(&address))
            .await
            .map_err(|_| InfrastructureError::Smpp(format!("connect to {} timed out", address)))??;

        debug!(address = %address, "smpp session connected");

        Ok(Self {
            stream,
            timeout: io_timeout,
            sequence: 0,
        })
    }

    fn next_sequence(&mut self) -> u32 {
        self.sequence = self.sequence.wrapping_add(1);
        self.sequence
    }

    /// Write one PDU and read the matching response body
    async fn request(
        &mut self,
        request: Vec<u8>,
        expected_response: u32,
    ) -> Result<Vec<u8>, InfrastructureError> {
        timeout(self.timeout, self.stream.write_all(&request))
            .await
            .map_err(|_| InfrastructureError::Smpp("write timed out".to_string()))??;

        let (header, body) = self.read_pdu().await?;

        if header.command_id != expected_response {
            return Err(InfrastructureError::Smpp(format!(
                "unexpected response command {:#010x} (expected {:#010x})",
                header.command_id, expected_response
            )));
        }
        if header.command_status != pdu::ESME_ROK {
            return Err(InfrastructureError::Smpp(format!(
                "command {:#010x} failed with status {:#010x}",
                header.command_id, header.command_status
            )));
        }

        Ok(body)
    }

    /// Read one length-prefixed PDU off the wire
    async fn read_pdu(&mut self) -> Result<(PduHeader, Vec<u8>), InfrastructureError> {
        let mut length_bytes = [0u8; 4];
        timeout(self.timeout, self.stream.read_exact(&mut length_bytes))
            .await
            .map_err(|_| InfrastructureError::Smpp("read timed out".to_string()))??;

        let command_length = u32::from_be_bytes(length_bytes);
        if command_length < pdu::HEADER_LEN as u32 || command_length > MAX_PDU_LEN {
            return Err(InfrastructureError::Smpp(format!(
                "invalid PDU length {}",
                command_length
            )));
        }

        let mut rest = vec![0u8; command_length as usize - 4];
        timeout(self.timeout, self.stream.read_exact(&mut rest))
            .await
            .map_err(|_| InfrastructureError::Smpp("read timed out".to_string()))??;

        let mut header_bytes = Vec::with_capacity(pdu::HEADER_LEN);
        header_bytes.extend_from_slice(&length_bytes);
        header_bytes.extend_from_slice(&rest[..pdu::HEADER_LEN - 4]);
        let header = pdu::decode_header(&header_bytes)?;
        let body = rest[pdu::HEADER_LEN - 4..].to_vec();

        Ok((header, body))
    }
}

#[async_trait]
impl SmppSession for TcpSmppSession {
    async fn bind_transmitter(
        &mut self,
        system_id: &str,
        password: &str,
    ) -> Result<(), InfrastructureError> {
        let sequence = self.next_sequence();
        let request = pdu::encode_bind_transmitter(sequence, system_id, password)?;
        self.request(request, pdu::BIND_TRANSMITTER_RESP).await?;
        debug!(system_id = %system_id, "bound as transmitter");
        Ok(())
    }

    async fn submit(
        &mut self,
        source: &str,
        destination: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let sequence = self.next_sequence();
        let request = pdu::encode_submit_sm(sequence, source, destination, body)?;
        let response_body = self.request(request, pdu::SUBMIT_SM_RESP).await?;
        Ok(pdu::parse_cstring(&response_body))
    }

    async fn close(&mut self) -> Result<(), InfrastructureError> {
        // Unbind is best-effort: the gateway may already have dropped the
        // session, but the socket must be released either way.
        let sequence = self.next_sequence();
        let unbind = pdu::encode_unbind(sequence);
        match timeout(self.timeout, self.stream.write_all(&unbind)).await {
            Ok(Ok(())) => {
                if let Err(error) = self.read_pdu().await {
                    warn!(error = %error, "unbind response not received");
                }
            }
            Ok(Err(error)) => warn!(error = %error, "unbind write failed"),
            Err(_) => warn!("unbind write timed out"),
        }

        timeout(self.timeout, self.stream.shutdown())
            .await
            .map_err(|_| InfrastructureError::Smpp("disconnect timed out".to_string()))??;

        debug!("smpp session closed");
        Ok(())
    }
}

/// Factory opening one `TcpSmppSession` per send
pub struct TcpSessionFactory {
    config: SmppConfig,
}

impl TcpSessionFactory {
    /// Create a factory with the given session defaults
    pub fn new(config: SmppConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SmppSessionFactory for TcpSessionFactory {
    type Session = TcpSmppSession;

    async fn connect(&self, host: &str, port: u16) -> Result<Self::Session, InfrastructureError> {
        TcpSmppSession::connect(host, port, Duration::from_secs(self.config.timeout_secs)).await
    }
}
