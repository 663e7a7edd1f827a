//! Boundary validation
//!
//! Checks presence and shape only. Content rules beyond that are out of scope.

use std::collections::BTreeMap;

use url::Url;

use crate::ValidationError;

/// Require a non-blank string field
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Require an absolute http(s) URL
pub fn validate_url(field: &str, value: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(value).map_err(|_| ValidationError::invalid_url(field))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ValidationError::invalid_url(field));
    }

    Ok(())
}

/// Validate every value of a platform -> URL map
pub fn validate_links(field: &str, links: &BTreeMap<String, String>) -> Result<(), ValidationError> {
    for (platform, url) in links {
        validate_url(&format!("{field}.{platform}"), url)?;
    }
    Ok(())
}
