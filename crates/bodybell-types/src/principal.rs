//! Authenticated principal

use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the identity provider.
///
/// Derived per request from a bearer token and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Filled in once the admin policy has been consulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl Principal {
    /// Create a principal with only an email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            picture: None,
            is_admin: None,
        }
    }

    /// Attach the admin decision
    #[must_use]
    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = Some(is_admin);
        self
    }

    /// Whether the admin policy granted elevated access
    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }
}
