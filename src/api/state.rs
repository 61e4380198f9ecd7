//! Application state for the Production Incentive Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded site configuration.
#[derive(Clone)]
pub struct AppState {
    /// The loaded site configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a handle to the configuration loader.
    pub fn config(&self) -> &Arc<ConfigLoader> {
        &self.config
    }
}
