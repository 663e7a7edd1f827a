//! Axum extractors for authentication and request bodies

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::Json;
use bodybell_types::Principal;
use serde::de::DeserializeOwned;

use crate::cookies::{read_cookie, ACCESS_TOKEN_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Raw session token from the `access_token` cookie
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        read_cookie(&parts.headers, ACCESS_TOKEN_COOKIE)
            .map(SessionToken)
            .ok_or(ApiError::Unauthenticated)
    }
}

/// Verified principal with its admin flag populated
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;

        let principal = app_state.auth.me(&token).await.map_err(|e| {
            tracing::debug!(error = %e, code = e.error_code(), "Token verification failed");
            ApiError::from(e)
        })?;

        Ok(AuthUser(principal))
    }
}

/// Verified principal on the admin allow-list
#[derive(Debug, Clone)]
pub struct AdminUser(pub Principal);

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let SessionToken(token) = SessionToken::from_request_parts(parts, state).await?;

        let principal = app_state.auth.authorize(&token).await.map_err(|e| {
            tracing::debug!(error = %e, code = e.error_code(), "Admin check failed");
            ApiError::from(e)
        })?;

        Ok(AdminUser(principal))
    }
}

/// JSON body whose rejections keep the `{error}` response shape
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T: DeserializeOwned> ValidJson<T> {
    /// Decode a body that was read earlier as raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ApiError> {
        Json::<T>::from_bytes(bytes)
            .map(|Json(value)| ValidJson(value))
            .map_err(json_rejection)
    }
}

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

/// Serde's own wording stays in the logs; clients get a short message
fn json_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!(detail = %rejection.body_text(), "Rejected request body");
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
        _ => "Invalid request body",
    };
    ApiError::Validation(message.to_string())
}
