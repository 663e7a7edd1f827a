//! Identity provider client
//!
//! Talks to the provider's OAuth2 endpoints: userinfo for token verification
//! and the token endpoint for the authorization-code exchange.

use std::time::Duration;

use bodybell_types::Principal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::{AuthConfig, AuthError};

/// Scopes requested at login
const LOGIN_SCOPE: &str = "openid profile email";

/// Raw userinfo response
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserInfo {
    /// Convert into a principal. Identities without an email cannot be
    /// checked against the admin list and are rejected.
    pub fn into_principal(self) -> Result<Principal, AuthError> {
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(AuthError::InvalidToken)?;

        Ok(Principal {
            email,
            name: self.name,
            picture: self.picture,
            is_admin: None,
        })
    }
}

/// Token endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Serialize)]
struct CodeExchangeRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: String,
}

/// HTTP client for the identity provider
#[derive(Clone)]
pub struct IdentityClient {
    config: AuthConfig,
    http_client: reqwest::Client,
}

impl IdentityClient {
    /// Create a new client.
    ///
    /// The HTTP client is configured with:
    /// - Connection pooling with idle timeout
    /// - The configured overall timeout so a hung provider fails the request
    pub fn new(config: AuthConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.http_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config,
            http_client,
        }
    }

    /// Redirect URI registered with the provider
    pub fn redirect_uri(&self) -> String {
        self.config.callback_url()
    }

    /// Resolve a bearer token to a principal via the userinfo endpoint
    pub async fn userinfo(&self, token: &str) -> Result<Principal, AuthError> {
        let response = self
            .http_client
            .get(self.config.userinfo_url())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "userinfo request failed");
                AuthError::Upstream(format!("userinfo request failed: {e}"))
            })?;

        // Any non-success answer from the provider counts as a rejected token
        let status = response.status();
        if !status.is_success() {
            if status.is_server_error() {
                warn!(%status, "identity provider error on userinfo");
            } else {
                debug!(%status, "identity provider rejected token");
            }
            return Err(AuthError::InvalidToken);
        }

        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(format!("invalid userinfo body: {e}")))?;

        info.into_principal()
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet, AuthError> {
        let body = CodeExchangeRequest {
            grant_type: "authorization_code",
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            code,
            redirect_uri: self.redirect_uri(),
        };

        let response = self
            .http_client
            .post(self.config.token_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Upstream(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, detail = %detail, "code exchange rejected");
            return Err(AuthError::CodeExchange(format!("token endpoint returned {status}")));
        }

        response
            .json::<TokenSet>()
            .await
            .map_err(|e| AuthError::CodeExchange(format!("invalid token response: {e}")))
    }

    /// Provider login URL carrying the given anti-forgery state
    pub fn authorize_url(&self, state: &str) -> Result<Url, AuthError> {
        let mut url = Url::parse(&self.config.authorize_url())
            .map_err(|e| AuthError::Configuration(format!("invalid issuer URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.redirect_uri())
            .append_pair("response_type", "code")
            .append_pair("scope", LOGIN_SCOPE)
            .append_pair("state", state);
        Ok(url)
    }

    /// Provider logout URL returning the browser to the site root
    pub fn logout_url(&self) -> Result<Url, AuthError> {
        let mut url = Url::parse(&self.config.logout_url())
            .map_err(|e| AuthError::Configuration(format!("invalid issuer URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("returnTo", &self.config.base_url);
        Ok(url)
    }
}
