//! Common test utilities for label-api integration tests
//!
//! Builds the full router over the in-memory store, with a wiremock server
//! standing in for the identity provider.

#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use bodybell_auth_core::{AuthConfig, AuthService};
use bodybell_db::Repositories;
use http_body_util::BodyExt;
use label_api::{build_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header as header_matcher, method, path};
use wiremock::{Mock, MockGuard, MockServer, ResponseTemplate};

pub const ADMIN_EMAIL: &str = "ben@bodybell.example";
pub const FAN_EMAIL: &str = "fan@example.com";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const FAN_TOKEN: &str = "fan-token";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub idp: MockServer,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// All `Set-Cookie` values
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect()
    }

    pub fn location(&self) -> Option<String> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

impl TestApp {
    /// App whose provider knows an admin token and a non-admin token
    pub async fn spawn() -> Self {
        Self::build(false, Duration::from_secs(10), "auth0").await
    }

    pub async fn spawn_with(production: bool) -> Self {
        Self::build(production, Duration::from_secs(10), "auth0").await
    }

    /// App whose API routes give up after `request_timeout`
    pub async fn spawn_with_timeout(request_timeout: Duration) -> Self {
        Self::build(false, request_timeout, "auth0").await
    }

    /// App that answers `/api/auth/{provider}` only for `provider`
    pub async fn spawn_with_provider(provider: &str) -> Self {
        Self::build(false, Duration::from_secs(10), provider).await
    }

    async fn build(production: bool, request_timeout: Duration, provider: &str) -> Self {
        let idp = MockServer::start().await;

        // Unknown tokens are rejected
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(u8::MAX)
            .mount(&idp)
            .await;

        let auth = AuthConfig::new(idp.uri(), "test-client", "test-secret", "http://localhost:8080")
            .with_provider(provider)
            .with_admin_emails([ADMIN_EMAIL])
            .with_http_timeout(Duration::from_secs(2));

        let config = Config {
            http_port: 0,
            database_url: None,
            auth: auth.clone(),
            production,
            request_timeout,
            metrics_enabled: false,
            seed_catalog: false,
        };

        let state = AppState::new(AuthService::new(auth), Repositories::in_memory(), config);
        let router = build_router(state.clone(), None);

        let app = Self { router, state, idp };
        app.accept_token(ADMIN_TOKEN, ADMIN_EMAIL).await;
        app.accept_token(FAN_TOKEN, FAN_EMAIL).await;
        app
    }

    pub async fn accept_token(&self, token: &str, email: &str) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header_matcher("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(userinfo(email)))
            .mount(&self.idp)
            .await;
    }

    pub async fn accept_token_expecting(&self, token: &str, email: &str, calls: u64) -> MockGuard {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header_matcher("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(userinfo(email)))
            .expect(calls)
            .mount_as_scoped(&self.idp)
            .await
    }

    /// Make every userinfo call answer with `status`
    pub async fn fail_userinfo(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(status))
            .with_priority(1)
            .mount(&self.idp)
            .await;
    }

    /// Make every userinfo call succeed with a body that is not JSON
    pub async fn garble_userinfo(&self) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .with_priority(1)
            .mount(&self.idp)
            .await;
    }

    /// Accept `token` only after `delay`
    pub async fn accept_token_slowly(&self, token: &str, email: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header_matcher("authorization", format!("Bearer {token}").as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(userinfo(email))
                    .set_delay(delay),
            )
            .mount(&self.idp)
            .await;
    }

    pub async fn accept_code(&self, code: &str, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_partial_json(serde_json::json!({
                "grant_type": "authorization_code",
                "code": code,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "expires_in": 86400
            })))
            .mount(&self.idp)
            .await;
    }

    pub async fn reject_codes(&self) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": "invalid_grant"
            })))
            .with_priority(u8::MAX)
            .mount(&self.idp)
            .await;
    }

    /// Send a request through the router
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Request carrying `token` in the session cookie
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let cookie = token.map(|t| format!("access_token={t}"));
        self.send(method, uri, cookie.as_deref(), body).await
    }

    pub async fn as_admin(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        self.call(method, uri, Some(ADMIN_TOKEN), body).await
    }
}

fn userinfo(email: &str) -> Value {
    serde_json::json!({
        "sub": format!("auth0|{email}"),
        "email": email,
        "name": "Test User",
        "picture": "https://cdn.example.com/avatar.png"
    })
}

pub fn artist_body(name: &str) -> Value {
    serde_json::json!({
        "name": name,
        "bio": "b",
        "members": [],
        "socialMedia": {}
    })
}
