//! Connector Provisioning Client
//!
//! Drives the SMPP gateway's line-oriented management console to create,
//! configure, and activate a connector before the SMPP adapter can
//! dispatch through it. Replies are read until the prompt sentinel
//! reappears or a timeout elapses; there are no fixed settling sleeps.

pub mod commands;
pub mod jcli;

pub use commands::provisioning_commands;
pub use jcli::JcliProvisioner;
