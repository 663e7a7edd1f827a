//! Body Bell Types - Shared domain types
//!
//! This crate contains domain types used across the label services:
//! - Authenticated principals returned by the identity provider
//! - Artists and albums as stored in the catalog
//! - Boundary validation for incoming documents

pub mod album;
pub mod artist;
pub mod clock;
pub mod error;
pub mod ids;
pub mod principal;
pub mod validation;

mod serde_util;

pub use album::*;
pub use artist::*;
pub use error::*;
pub use ids::*;
pub use principal::*;
