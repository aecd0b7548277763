//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{config::Config, services::HookupService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Hookup persistence and rules
    hookups: Arc<dyn HookupService>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(hookups: Arc<dyn HookupService>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner { hookups, config }),
        }
    }

    /// Get a reference to the hookup service
    pub fn hookups(&self) -> &dyn HookupService {
        self.inner.hookups.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
