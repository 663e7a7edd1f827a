//! Cookie parsing and `Set-Cookie` values

use axum::http::{header, HeaderMap};

/// Session cookie carrying the provider access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Anti-forgery state issued at login, checked on callback
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// Lifetime of the login state cookie
const OAUTH_STATE_MAX_AGE_SECS: u64 = 600;

/// Value of a named cookie from the request, if present and non-empty
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

fn build(name: &str, value: &str, max_age: Option<u64>, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; HttpOnly; SameSite=Lax; Path=/");
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Session cookie set after a successful login
pub fn session_cookie(token: &str, secure: bool) -> String {
    build(ACCESS_TOKEN_COOKIE, token, None, secure)
}

/// Login state cookie
pub fn state_cookie(state: &str, secure: bool) -> String {
    build(OAUTH_STATE_COOKIE, state, Some(OAUTH_STATE_MAX_AGE_SECS), secure)
}

/// Expire a cookie immediately
pub fn clear_cookie(name: &str, secure: bool) -> String {
    build(name, "", Some(0), secure)
}
