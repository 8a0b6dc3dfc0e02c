//! Minimal SMPP v3.4 transmitter support
//!
//! Just enough of the protocol for the session-per-send delivery pattern:
//! `bind_transmitter`, one `submit_sm`, `unbind`. Receiver-side PDUs are
//! out of scope. The session is abstracted behind a trait pair so the
//! delivery adapter can be tested with a scripted fake.

pub mod pdu;
pub mod session;

pub use session::{TcpSessionFactory, TcpSmppSession};

use async_trait::async_trait;

use crate::InfrastructureError;

/// One bound SMPP session
///
/// Sessions are single-use: bind, submit one message, close. `close` must
/// be called on every session that was successfully created, whatever the
/// outcome of bind or submit.
#[async_trait]
pub trait SmppSession: Send {
    /// Bind as a transmitter with the given system credentials
    async fn bind_transmitter(
        &mut self,
        system_id: &str,
        password: &str,
    ) -> Result<(), InfrastructureError>;

    /// Submit one short message; returns the gateway-assigned message id
    /// (possibly empty)
    async fn submit(
        &mut self,
        source: &str,
        destination: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Tear the session down: unbind, then disconnect
    async fn close(&mut self) -> Result<(), InfrastructureError>;
}

/// Opens SMPP sessions against a gateway
#[async_trait]
pub trait SmppSessionFactory: Send + Sync {
    type Session: SmppSession + Send;

    /// Open a TCP connection to the gateway
    async fn connect(&self, host: &str, port: u16) -> Result<Self::Session, InfrastructureError>;
}
