//! Body Bell Auth Core - Authentication business logic
//!
//! Verifies bearer tokens against the identity provider's userinfo endpoint,
//! decides admin access from a static allow-list, and memoizes both for a
//! short window so repeated requests do not hit the provider.

pub mod admin;
pub mod cache;
pub mod config;
pub mod error;
pub mod identity;
pub mod oauth;
pub mod service;

pub use admin::{parse_admin_list, AdminPolicy};
pub use cache::{hash_token, SessionCache};
pub use config::{AuthConfig, CALLBACK_PATH, DEFAULT_SESSION_TTL};
pub use error::AuthError;
pub use identity::{IdentityClient, TokenSet, UserInfo};
pub use oauth::{new_state, state_matches};
pub use service::AuthService;
