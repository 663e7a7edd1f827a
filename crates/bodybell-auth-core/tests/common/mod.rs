//! Common test utilities for bodybell-auth-core integration tests

pub mod idp_mock;

#[allow(unused_imports)]
pub use idp_mock::{IdpMockServer, ADMIN_EMAIL, FAN_EMAIL};
