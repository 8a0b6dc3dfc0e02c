//! MySQL repository implementations

pub mod attempt_repository_impl;
pub mod backend_repository_impl;
pub mod client_repository_impl;

pub use attempt_repository_impl::MySqlAttemptRepository;
pub use backend_repository_impl::MySqlBackendConfigRepository;
pub use client_repository_impl::MySqlClientRepository;
