//! Database access: connection pool and MySQL repositories

pub mod connection;
pub mod mysql;

pub use connection::create_pool;
pub use mysql::{MySqlAttemptRepository, MySqlBackendConfigRepository, MySqlClientRepository};
