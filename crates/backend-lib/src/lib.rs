// ============================
// credgate-backend-lib/src/lib.rs
// ============================
//! Core library of the credgate authentication server: salted password
//! hashing, input screening, an in-memory credential store and the HTTP API
//! on top of them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthRateLimiter, AuthService, DefaultAuth};
use crate::config::Settings;
use crate::storage::{MemoryStorage, Storage};

/// How often stale lockout entries are swept
const LIMITER_CLEANUP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Storage backend
    pub storage: S,
    /// Configuration settings
    pub settings: Arc<Settings>,
}

impl<S: Storage> AppState<S> {
    /// Create a new application state, seeding the admin account if configured.
    ///
    /// Must be called inside a tokio runtime.
    pub async fn new(storage: S, config: &Settings) -> anyhow::Result<Self> {
        let limiter = AuthRateLimiter::new(
            config.auth.max_failed_attempts,
            config.auth.lockout_duration(),
        );
        let auth = Arc::new(DefaultAuth::new(storage.clone(), limiter.clone(), &config.auth));

        if config.auth.seed_admin {
            auth.seed_admin(&config.auth.admin_username, &config.auth.admin_password)
                .await?;
        }

        if limiter.is_enabled() {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(LIMITER_CLEANUP_INTERVAL);
                loop {
                    interval.tick().await;
                    limiter.cleanup();
                }
            });
        }

        Ok(Self {
            auth,
            storage,
            settings: Arc::new(config.clone()),
        })
    }
}

impl AppState<MemoryStorage> {
    /// Create a new application state with an empty in-memory store
    pub async fn in_memory(config: &Settings) -> anyhow::Result<Self> {
        Self::new(MemoryStorage::new(), config).await
    }
}
