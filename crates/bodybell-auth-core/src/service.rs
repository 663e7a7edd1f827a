//! Auth service - ties together identity verification, the session cache and
//! the admin allow-list

use std::fmt;

use bodybell_types::Principal;
use tracing::{debug, instrument};
use url::Url;

use crate::{AdminPolicy, AuthConfig, AuthError, IdentityClient, SessionCache, TokenSet};

/// Authentication service
///
/// Drives the request auth gate:
/// - no token or a rejected token is unauthenticated
/// - a verified principal outside the allow-list is forbidden
/// - everyone else is authorized
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
    identity: IdentityClient,
    cache: SessionCache,
    policy: AdminPolicy,
}

impl AuthService {
    /// Create a new auth service from configuration
    pub fn new(config: AuthConfig) -> Self {
        let identity = IdentityClient::new(config.clone());
        let cache = SessionCache::new(config.cache_ttl, config.cache_max_entries);
        let policy = AdminPolicy::new(config.admin_emails.iter().cloned());
        Self {
            config,
            identity,
            cache,
            policy,
        }
    }

    pub fn policy(&self) -> &AdminPolicy {
        &self.policy
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Resolve a token to its principal, consulting the cache first
    #[instrument(skip(self, token))]
    pub async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        if let Some(principal) = self.cache.principal(token).await {
            return Ok(principal);
        }

        let principal = self.identity.userinfo(token).await?;
        debug!(email = %principal.email, "verified token with identity provider");
        self.cache.put_principal(token, principal.clone()).await;
        Ok(principal)
    }

    /// Whether an email is on the admin allow-list
    pub async fn is_admin(&self, email: &str) -> bool {
        if let Some(flag) = self.cache.admin_flag(email).await {
            return flag;
        }

        let flag = self.policy.is_admin(email);
        self.cache.put_admin_flag(email, flag).await;
        flag
    }

    /// Verify a token and report the principal with its admin flag set
    #[instrument(skip(self, token))]
    pub async fn me(&self, token: &str) -> Result<Principal, AuthError> {
        let principal = self.verify(token).await?;
        let is_admin = self.is_admin(&principal.email).await;
        Ok(principal.with_admin(is_admin))
    }

    /// Verify a token and require admin access
    #[instrument(skip(self, token))]
    pub async fn authorize(&self, token: &str) -> Result<Principal, AuthError> {
        let principal = self.me(token).await?;
        if !principal.is_admin() {
            debug!(email = %principal.email, "principal is not an admin");
            return Err(AuthError::NotAdmin(principal.email));
        }
        Ok(principal)
    }

    // =========================================================================
    // Login flow
    // =========================================================================

    pub fn login_url(&self, state: &str) -> Result<Url, AuthError> {
        self.identity.authorize_url(state)
    }

    /// Complete the authorization-code flow, returning the access token and
    /// the principal it resolves to. The principal is cached so the first
    /// request after login does not hit the provider again.
    #[instrument(skip(self, code))]
    pub async fn complete_login(&self, code: &str) -> Result<(TokenSet, Principal), AuthError> {
        let tokens = self.identity.exchange_code(code).await?;
        let principal = self.identity.userinfo(&tokens.access_token).await?;
        self.cache
            .put_principal(&tokens.access_token, principal.clone())
            .await;
        Ok((tokens, principal))
    }

    /// Drop any cached state for the token and return the provider logout URL
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: Option<&str>) -> Result<Url, AuthError> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.cache.invalidate_token(token).await;
        }
        self.identity.logout_url()
    }
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("issuer_url", &self.config.issuer_url)
            .field("admins", &self.policy.len())
            .field("cache_ttl", &self.cache.ttl())
            .finish()
    }
}
