//! Body Bell Label API
//!
//! HTTP service behind the record label site.
//!
//! ## Catalog (admin only)
//!
//! - `GET|POST /api/artists`, `GET|PUT|DELETE /api/artists/{id}`
//! - `GET /api/artists/{id}/albums`
//! - `GET|POST /api/albums`, `GET|PUT|DELETE /api/albums/{id}`
//!
//! ## Auth
//!
//! - `GET /api/auth/me` - Current principal
//! - `GET /api/auth/is-admin` - Admin flag for the current session
//! - `GET /api/auth/{provider}?action=login|logout` - Provider redirects
//! - `GET /api/auth/callback` - Authorization-code callback
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod cookies;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
