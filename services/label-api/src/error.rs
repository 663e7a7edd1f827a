//! Error types for the Label API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bodybell_auth_core::AuthError;
use bodybell_db::DbError;
use serde::Serialize;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Not authorized")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show the client. Server-side failures are not leaked.
    pub fn public_message(&self) -> String {
        match self {
            Self::Upstream(_) | Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken => Self::Unauthenticated,
            AuthError::NotAdmin(_) => Self::Forbidden,
            AuthError::CodeExchange(_) => {
                Self::BadRequest("Failed to exchange code for token".to_string())
            }
            AuthError::Upstream(msg) => Self::Upstream(msg),
            AuthError::Configuration(msg) => Self::Internal(msg),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => Self::NotFound("Record"),
            DbError::Validation(e) => Self::Validation(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Attach the entity name to a repository miss
pub trait DbResultExt<T> {
    fn or_not_found(self, entity: &'static str) -> ApiResult<T>;
}

impl<T> DbResultExt<T> for Result<T, DbError> {
    fn or_not_found(self, entity: &'static str) -> ApiResult<T> {
        self.map_err(|e| match e {
            DbError::NotFound => ApiError::NotFound(entity),
            other => other.into(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Internal API error");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "Request rejected");
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
