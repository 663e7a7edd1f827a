//! Application state

use std::sync::Arc;
use std::time::Duration;

use bodybell_auth_core::AuthService;
use bodybell_db::Repositories;

use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Identity verification, admin policy and session cache
    pub auth: Arc<AuthService>,
    /// Catalog repositories
    pub repos: Repositories,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(auth: AuthService, repos: Repositories, config: Config) -> Self {
        Self {
            auth: Arc::new(auth),
            repos,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout
    }

    /// Whether cookies carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.config.production
    }
}
