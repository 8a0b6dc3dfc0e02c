//! HTTP API layer for the OtpDispatch backend
//!
//! Exposes the send, history, and registry endpoints over actix-web and
//! wires the core services to their infrastructure implementations.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
