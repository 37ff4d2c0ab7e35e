// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const REGISTER_SUCCESS: &str = "auth.register.success";
pub const REGISTER_REJECTED: &str = "auth.register.rejected";
pub const LOGIN_SUCCESS: &str = "auth.login.success";
pub const LOGIN_FAILURE: &str = "auth.login.failure";
pub const LOGIN_LOCKED: &str = "auth.login.locked";
pub const USERS_DENIED: &str = "auth.users.denied";
