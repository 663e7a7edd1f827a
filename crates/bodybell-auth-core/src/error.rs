//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No token presented
    #[error("missing token")]
    MissingToken,

    /// Identity provider rejected the token, or returned no usable identity
    #[error("invalid token")]
    InvalidToken,

    /// Authenticated, but not on the admin allow-list
    #[error("not authorized: {0}")]
    NotAdmin(String),

    /// Authorization-code exchange was refused by the provider
    #[error("code exchange failed: {0}")]
    CodeExchange(String),

    /// Identity provider unreachable or returned an unexpected response
    #[error("identity provider error: {0}")]
    Upstream(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingToken | Self::InvalidToken => 401,
            Self::NotAdmin(_) => 403,
            Self::CodeExchange(_) => 400,
            Self::Upstream(_) | Self::Configuration(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::NotAdmin(_) => "NOT_ADMIN",
            Self::CodeExchange(_) => "CODE_EXCHANGE_FAILED",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Whether the caller failed to prove who they are
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::MissingToken | Self::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingToken.status_code(), 401);
        assert_eq!(AuthError::InvalidToken.status_code(), 401);
        assert_eq!(AuthError::NotAdmin("a@b.c".into()).status_code(), 403);
        assert_eq!(AuthError::Upstream("down".into()).status_code(), 500);
    }

    #[test]
    fn test_is_unauthenticated() {
        assert!(AuthError::MissingToken.is_unauthenticated());
        assert!(!AuthError::Upstream("x".into()).is_unauthenticated());
    }
}
