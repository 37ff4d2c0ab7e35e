// ============================
// crates/backend-lib/src/auth/rate_limit.rs
// ============================
//! Server-side tracking of failed login attempts.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Default number of failed attempts before a lockout
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default lockout duration (5 minutes)
pub const DEFAULT_LOCKOUT_DURATION: Duration = Duration::from_secs(5 * 60);

/// How long an idle failure counter is remembered
const ENTRY_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct AttemptEntry {
    failed_attempts: u32,
    last_failure: Instant,
    lockout_expiry: Option<Instant>,
}

/// Failed-login counter keyed by client and username
#[derive(Debug, Clone)]
pub struct AuthRateLimiter {
    attempts: Arc<DashMap<String, AttemptEntry>>,
    max_attempts: u32,
    lockout_duration: Duration,
}

impl Default for AuthRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_LOCKOUT_DURATION)
    }
}

impl AuthRateLimiter {
    /// Create a limiter. `max_attempts == 0` disables lockouts.
    pub fn new(max_attempts: u32, lockout_duration: Duration) -> Self {
        Self {
            attempts: Arc::new(DashMap::new()),
            max_attempts,
            lockout_duration,
        }
    }

    /// Key for a client/username pair
    pub fn key(client: &str, username: &str) -> String {
        format!("{client}|{username}")
    }

    pub fn is_enabled(&self) -> bool {
        self.max_attempts > 0
    }

    /// Whether the key may attempt a login now
    pub fn check(&self, key: &str) -> bool {
        if !self.is_enabled() {
            return true;
        }
        match self.attempts.get(key) {
            Some(entry) => !matches!(entry.lockout_expiry, Some(expiry) if Instant::now() < expiry),
            None => true,
        }
    }

    /// Record a failed attempt, starting a lockout once the limit is hit
    pub fn record_failure(&self, key: &str) {
        if !self.is_enabled() {
            return;
        }
        let now = Instant::now();

        let mut entry = self
            .attempts
            .entry(key.to_string())
            .or_insert_with(|| AttemptEntry {
                failed_attempts: 0,
                last_failure: now,
                lockout_expiry: None,
            });

        // An expired lockout starts a fresh window
        if let Some(expiry) = entry.lockout_expiry {
            if now >= expiry {
                entry.failed_attempts = 0;
                entry.lockout_expiry = None;
            }
        }

        entry.failed_attempts += 1;
        entry.last_failure = now;

        if entry.failed_attempts >= self.max_attempts && entry.lockout_expiry.is_none() {
            entry.lockout_expiry = Some(now + self.lockout_duration);
            warn!(key, lockout_secs = self.lockout_duration.as_secs(), "login attempts locked out");
        }
    }

    /// Forget the failures of a key after a successful login
    pub fn record_success(&self, key: &str) {
        self.attempts.remove(key);
    }

    /// Drop expired lockouts and stale counters
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.attempts.retain(|_, entry| match entry.lockout_expiry {
            Some(expiry) => now < expiry,
            None => now.duration_since(entry.last_failure) < ENTRY_RETENTION,
        });
    }

    /// Number of tracked keys
    pub fn tracked(&self) -> usize {
        self.attempts.len()
    }
}
