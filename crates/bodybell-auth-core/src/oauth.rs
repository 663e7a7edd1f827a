//! Login state helpers

use subtle::ConstantTimeEq;

/// Fresh anti-forgery state for a login redirect
pub fn new_state() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Compare a returned state with the one issued, in constant time
pub fn state_matches(issued: &str, returned: &str) -> bool {
    issued.as_bytes().ct_eq(returned.as_bytes()).into()
}
