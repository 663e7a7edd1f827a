//! Authentication handlers (provider redirects, callback, me, is-admin)

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bodybell_auth_core::{new_state, state_matches, AuthError};
use bodybell_types::Principal;
use serde::{Deserialize, Serialize};

use crate::cookies::{
    clear_cookie, read_cookie, session_cookie, state_cookie, ACCESS_TOKEN_COOKIE,
    OAUTH_STATE_COOKIE,
};
use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AuthActionQuery {
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/auth/{provider}?action=login|logout
///
/// Redirect the browser to the provider's login or logout page
pub async fn auth_action(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<AuthActionQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    if provider != state.config.auth.provider {
        return Err(ApiError::BadRequest("Unsupported provider".to_string()));
    }

    let secure = state.secure_cookies();
    match query.action.as_deref() {
        Some("login") => {
            let login_state = new_state();
            let url = state.auth.login_url(&login_state)?;
            tracing::debug!("Starting login flow");
            Ok(redirect(
                url.as_str(),
                &[state_cookie(&login_state, secure)],
            ))
        }
        Some("logout") => {
            let token = read_cookie(&headers, ACCESS_TOKEN_COOKIE);
            let url = state.auth.logout(token.as_deref()).await?;
            tracing::debug!(had_session = token.is_some(), "Starting logout flow");
            Ok(redirect(
                url.as_str(),
                &[clear_cookie(ACCESS_TOKEN_COOKIE, secure)],
            ))
        }
        other => {
            tracing::debug!(action = ?other, "Invalid auth action");
            Err(ApiError::BadRequest("Invalid action".to_string()))
        }
    }
}

/// GET /api/auth/callback?code&state
///
/// Complete the authorization-code flow and set the session cookie
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No code provided".to_string()))?;

    let issued = read_cookie(&headers, OAUTH_STATE_COOKIE);
    let state_ok = match (issued.as_deref(), query.state.as_deref()) {
        (Some(issued), Some(returned)) => state_matches(issued, returned),
        _ => false,
    };
    if !state_ok {
        return Err(ApiError::BadRequest("Invalid state".to_string()));
    }

    let (tokens, principal) = state
        .auth
        .complete_login(&code)
        .await
        .map_err(callback_error)?;

    tracing::info!(email = %principal.email, "Login completed");
    metrics::counter!("label_auth_logins_total").increment(1);

    let secure = state.secure_cookies();
    Ok(redirect(
        "/",
        &[
            session_cookie(&tokens.access_token, secure),
            clear_cookie(OAUTH_STATE_COOKIE, secure),
        ],
    ))
}

fn callback_error(err: AuthError) -> ApiError {
    match err {
        AuthError::CodeExchange(_) => {
            ApiError::BadRequest("Failed to exchange code for token".to_string())
        }
        AuthError::InvalidToken => ApiError::BadRequest("Failed to get user info".to_string()),
        other => other.into(),
    }
}

/// GET /api/auth/me
pub async fn me(AuthUser(principal): AuthUser) -> Json<Principal> {
    Json(principal)
}

/// GET /api/auth/is-admin
///
/// Always answers with an `isAdmin` body, even on failure
pub async fn is_admin(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = read_cookie(&headers, ACCESS_TOKEN_COOKIE) else {
        return is_admin_response(StatusCode::UNAUTHORIZED, false);
    };

    match state.auth.me(&token).await {
        Ok(principal) => is_admin_response(StatusCode::OK, principal.is_admin()),
        Err(e) if e.is_unauthenticated() => is_admin_response(StatusCode::UNAUTHORIZED, false),
        Err(e) => {
            tracing::error!(error = %e, "Admin check failed");
            is_admin_response(StatusCode::INTERNAL_SERVER_ERROR, false)
        }
    }
}

fn is_admin_response(status: StatusCode, is_admin: bool) -> Response {
    (status, Json(IsAdminResponse { is_admin })).into_response()
}

/// 302 to `location`, setting each cookie
fn redirect(location: &str, cookies: &[String]) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    let headers = response.headers_mut();

    match HeaderValue::from_str(location) {
        Ok(value) => {
            headers.insert(header::LOCATION, value);
        }
        Err(e) => {
            return ApiError::Internal(format!("invalid redirect location: {e}")).into_response();
        }
    }

    for cookie in cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => {
                return ApiError::Internal(format!("invalid cookie value: {e}")).into_response();
            }
        }
    }

    response
}
