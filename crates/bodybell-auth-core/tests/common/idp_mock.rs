//! Mock identity provider for integration testing
//!
//! Serves userinfo and the token endpoint with wiremock. Tokens are plain
//! strings; each registered token maps to one identity.

use bodybell_auth_core::AuthConfig;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockGuard, MockServer, ResponseTemplate};

pub const ADMIN_EMAIL: &str = "ben@bodybell.example";
pub const FAN_EMAIL: &str = "fan@example.com";
pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";

pub struct IdpMockServer {
    server: MockServer,
}

impl IdpMockServer {
    /// Start a mock provider that rejects every token not registered later
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        // Lowest priority fallback: unknown tokens are rejected
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .with_priority(u8::MAX)
            .mount(&server)
            .await;

        Self { server }
    }

    #[allow(dead_code)]
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Auth config pointing at this server, with the admin allow-list set
    #[allow(dead_code)]
    pub fn config(&self) -> AuthConfig {
        AuthConfig::new(
            self.server.uri(),
            CLIENT_ID,
            CLIENT_SECRET,
            "http://localhost:8080",
        )
        .with_admin_emails([ADMIN_EMAIL])
    }

    /// Accept `token` as belonging to `email`
    #[allow(dead_code)]
    pub async fn accept_token(&self, token: &str, email: &str) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(userinfo(email)))
            .mount(&self.server)
            .await;
    }

    /// Accept `token` and assert how many times the provider is consulted
    #[allow(dead_code)]
    pub async fn accept_token_expecting(&self, token: &str, email: &str, calls: u64) -> MockGuard {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(userinfo(email)))
            .expect(calls)
            .mount_as_scoped(&self.server)
            .await
    }

    /// Make userinfo answer every token with `status`
    #[allow(dead_code)]
    pub async fn fail_userinfo(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(status))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Answer userinfo with a 200 whose body is not JSON
    #[allow(dead_code)]
    pub async fn serve_malformed_userinfo(&self) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Answer userinfo with an identity that carries no email
    #[allow(dead_code)]
    pub async fn accept_token_without_email(&self, token: &str) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "sub": "auth0|anon" })),
            )
            .mount(&self.server)
            .await;
    }

    /// Exchange `code` for `access_token`
    #[allow(dead_code)]
    pub async fn accept_code(&self, code: &str, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_partial_json(serde_json::json!({
                "grant_type": "authorization_code",
                "client_id": CLIENT_ID,
                "client_secret": CLIENT_SECRET,
                "code": code,
                "redirect_uri": "http://localhost:8080/api/auth/callback",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": access_token,
                "id_token": "id-token",
                "expires_in": 86400,
                "token_type": "Bearer"
            })))
            .mount(&self.server)
            .await;
    }

    /// Reject every code exchange not registered with `accept_code`
    #[allow(dead_code)]
    pub async fn reject_unknown_codes(&self) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": "invalid_grant"
            })))
            .with_priority(u8::MAX)
            .mount(&self.server)
            .await;
    }
}

fn userinfo(email: &str) -> serde_json::Value {
    serde_json::json!({
        "sub": format!("auth0|{email}"),
        "email": email,
        "name": email.split('@').next().unwrap_or(email),
        "picture": "https://cdn.example.com/avatar.png"
    })
}
