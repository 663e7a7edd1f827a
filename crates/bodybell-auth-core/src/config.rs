//! Configuration types for the auth service

use std::time::Duration;

/// Path the identity provider redirects back to after login
pub const CALLBACK_PATH: &str = "/api/auth/callback";

/// Freshness window for cached principals and admin decisions
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(5 * 60);

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Provider name accepted in `/api/auth/{provider}` (e.g. `auth0`)
    pub provider: String,
    /// Identity provider base URL without trailing slash (e.g. https://tenant.auth0.com)
    pub issuer_url: String,
    /// OAuth2 client ID
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Public base URL of this site, used for redirect and logout return URLs
    pub base_url: String,
    /// Admin allow-list
    pub admin_emails: Vec<String>,
    /// Session cache freshness window
    pub cache_ttl: Duration,
    /// Session cache capacity
    pub cache_max_entries: u64,
    /// Timeout for calls to the identity provider
    pub http_timeout: Duration,
}

impl AuthConfig {
    /// Create a new auth config.
    ///
    /// A bare domain is accepted as issuer and gets an `https://` prefix.
    pub fn new(
        issuer_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            provider: "auth0".to_string(),
            issuer_url: normalize_base(&issuer_url.into()),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: normalize_base(&base_url.into()),
            admin_emails: Vec::new(),
            cache_ttl: DEFAULT_SESSION_TTL,
            cache_max_entries: 10_000,
            http_timeout: Duration::from_secs(10),
        }
    }

    /// Userinfo endpoint
    pub fn userinfo_url(&self) -> String {
        format!("{}/userinfo", self.issuer_url)
    }

    /// Authorization endpoint
    pub fn authorize_url(&self) -> String {
        format!("{}/authorize", self.issuer_url)
    }

    /// Token endpoint for the authorization-code exchange
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.issuer_url)
    }

    /// Provider logout endpoint
    pub fn logout_url(&self) -> String {
        format!("{}/v2/logout", self.issuer_url)
    }

    /// Redirect URI registered with the provider
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.base_url, CALLBACK_PATH)
    }

    /// Set the provider name
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Set the admin allow-list
    pub fn with_admin_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admin_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    /// Set the session cache TTL
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the session cache capacity
    pub fn with_cache_max_entries(mut self, max: u64) -> Self {
        self.cache_max_entries = max;
        self
    }

    /// Set the identity provider timeout
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }
}

fn normalize_base(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_urls() {
        let config = AuthConfig::new(
            "https://bodybell.us.auth0.com/",
            "client",
            "secret",
            "https://bodybell.example",
        );
        assert_eq!(config.userinfo_url(), "https://bodybell.us.auth0.com/userinfo");
        assert_eq!(config.token_url(), "https://bodybell.us.auth0.com/oauth/token");
        assert_eq!(config.authorize_url(), "https://bodybell.us.auth0.com/authorize");
        assert_eq!(config.logout_url(), "https://bodybell.us.auth0.com/v2/logout");
        assert_eq!(
            config.callback_url(),
            "https://bodybell.example/api/auth/callback"
        );
    }

    #[test]
    fn test_bare_domain_gets_https() {
        let config = AuthConfig::new("bodybell.us.auth0.com", "c", "s", "localhost:3000");
        assert_eq!(config.issuer_url, "https://bodybell.us.auth0.com");
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("https://idp", "c", "s", "http://localhost:8080");
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.provider, "auth0");
        assert!(config.admin_emails.is_empty());
    }
}
