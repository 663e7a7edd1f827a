//! Validation errors for catalog documents

use thiserror::Error;

/// A document failed boundary validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank
    #[error("{0} is required")]
    Required(&'static str),

    /// A field that must hold a URL does not
    #[error("{field} must be a valid URL")]
    InvalidUrl {
        /// Field path, e.g. `socialMedia.instagram`
        field: String,
    },
}

impl ValidationError {
    /// Create an invalid URL error for a field path
    pub fn invalid_url(field: impl Into<String>) -> Self {
        Self::InvalidUrl {
            field: field.into(),
        }
    }
}
