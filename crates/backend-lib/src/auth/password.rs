// ============================
// credgate-backend-lib/src/auth/password.rs
// ============================
//! Salt generation, password hashing and verification.
//!
//! Hashes are HMAC-SHA256 digests of the password keyed with the per-user salt,
//! rendered as lowercase hex.
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes per salt
pub const SALT_BYTES: usize = 16;

/// Length of a hex encoded salt
pub const SALT_HEX_LEN: usize = SALT_BYTES * 2;

/// Length of a hex encoded hash (256-bit digest)
pub const HASH_HEX_LEN: usize = 64;

/// Generate a fresh random salt as lowercase hex
pub fn generate_salt() -> String {
    let mut buffer = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut buffer);
    hex::encode(buffer)
}

fn keyed_mac(password: &str, salt: &str) -> HmacSha256 {
    // HMAC accepts keys of any length, including empty ones.
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .unwrap_or_else(|_| unreachable!("hmac accepts keys of any length"));
    mac.update(password.as_bytes());
    mac
}

/// Hash a password with the given salt
pub fn hash_password(password: &str, salt: &str) -> String {
    hex::encode(keyed_mac(password, salt).finalize().into_bytes())
}

/// Verify a password against a stored hash.
///
/// The digest comparison runs in constant time. A stored hash that is not
/// 64 hex characters never matches.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    if stored_hash.len() != HASH_HEX_LEN {
        return false;
    }
    let Ok(expected) = hex::decode(stored_hash) else {
        return false;
    };
    keyed_mac(password, salt).verify_slice(&expected).is_ok()
}
