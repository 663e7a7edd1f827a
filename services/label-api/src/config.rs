//! Configuration for the Label API service.

use std::time::Duration;

use bodybell_auth_core::{parse_admin_list, AuthConfig};

/// Label API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL; the in-memory store is used when absent
    pub database_url: Option<String>,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// Mark session cookies `Secure`
    pub production: bool,

    /// Request timeout
    pub request_timeout: Duration,

    /// Metrics enabled
    pub metrics_enabled: bool,

    /// Insert the sample catalog at startup
    pub seed_catalog: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        // Server
        let http_port = parse_or(&var, "HTTP_PORT", 8080u16)?;

        // Identity provider
        let provider = var("AUTH_PROVIDER").unwrap_or_else(|| "auth0".to_string());
        let issuer_url = var("AUTH_ISSUER_URL")
            .or_else(|| var("AUTH_DOMAIN"))
            .ok_or(ConfigError::Missing("AUTH_ISSUER_URL"))?;
        let client_id = var("AUTH_CLIENT_ID").ok_or(ConfigError::Missing("AUTH_CLIENT_ID"))?;
        let client_secret =
            var("AUTH_CLIENT_SECRET").ok_or(ConfigError::Missing("AUTH_CLIENT_SECRET"))?;
        let base_url = var("APP_BASE_URL").unwrap_or_else(|| "http://localhost:8080".to_string());

        // Admin allow-list (comma-separated)
        let admin_emails = parse_admin_list(&var("ADMIN_EMAILS").unwrap_or_default());

        // Session cache
        let cache_ttl_secs = parse_or(&var, "SESSION_CACHE_TTL_SECS", 300u64)?;
        let cache_max_entries = parse_or(&var, "SESSION_CACHE_MAX_ENTRIES", 10_000u64)?;
        let idp_timeout_secs = parse_or(&var, "IDP_TIMEOUT_SECS", 10u64)?;

        // Request timeout (default 30 seconds)
        let request_timeout_secs = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30u64)?;

        let production = var("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let metrics_enabled = var("METRICS_ENABLED")
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        let seed_catalog = var("SEED_CATALOG")
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        let auth = AuthConfig::new(issuer_url, client_id, client_secret, base_url)
            .with_provider(provider.trim())
            .with_admin_emails(admin_emails)
            .with_cache_ttl(Duration::from_secs(cache_ttl_secs))
            .with_cache_max_entries(cache_max_entries)
            .with_http_timeout(Duration::from_secs(idp_timeout_secs));

        Ok(Self {
            http_port,
            database_url: var("DATABASE_URL"),
            auth,
            production,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
            seed_catalog,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
