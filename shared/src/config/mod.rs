//! Configuration types shared across server modules

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;
