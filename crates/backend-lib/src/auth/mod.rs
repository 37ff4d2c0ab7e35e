// ============================
// credgate-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod rate_limit;
mod service;
mod service_impl;

pub use password::{generate_salt, hash_password, verify_password, HASH_HEX_LEN, SALT_HEX_LEN};
pub use rate_limit::AuthRateLimiter;
pub use service::AuthService;
pub use service_impl::DefaultAuth;
