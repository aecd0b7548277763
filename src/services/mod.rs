//! Business logic services

pub mod auth_service;
pub mod hookup_service;

pub use auth_service::AuthService;
pub use hookup_service::{HookupService, PgHookupService};

#[cfg(test)]
pub use hookup_service::MockHookupService;
