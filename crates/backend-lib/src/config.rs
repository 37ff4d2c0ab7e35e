// ============================
// credgate-backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use ::config::{Config, Environment, File};
use serde::Deserialize;

/// Default configuration file, looked up relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config/default.toml";

/// Prefix of environment overrides, e.g. `CREDGATE__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "CREDGATE";

/// Application settings
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

/// Listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Take the client address from `x-real-ip` / `x-forwarded-for`.
    /// Only enable behind a reverse proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
}

/// Authentication behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Delay applied to every failed login before answering
    pub failure_delay_ms: u64,
    /// Failed logins per client and username before a lockout. 0 disables.
    pub max_failed_attempts: u32,
    /// Lockout length in seconds
    pub lockout_secs: u64,
    /// Create the admin account at startup if it does not exist
    pub seed_admin: bool,
    pub admin_username: String,
    pub admin_password: String,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            trust_proxy_headers: false,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            failure_delay_ms: 100,
            max_failed_attempts: 5,
            lockout_secs: 5 * 60,
            seed_admin: true,
            admin_username: "admin".to_string(),
            admin_password: "Admin123".to_string(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AuthSettings {
    pub fn failure_delay(&self) -> Duration {
        Duration::from_millis(self.failure_delay_ms)
    }

    pub fn lockout_duration(&self) -> Duration {
        Duration::from_secs(self.lockout_secs)
    }
}

impl Settings {
    /// Load settings from the default file (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::build(DEFAULT_CONFIG_FILE, false)
    }

    /// Load settings from a specific file, which must exist, and the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path = path
            .to_str()
            .with_context(|| format!("config path is not valid UTF-8: {}", path.display()))?;
        Self::build(path, true)
    }

    fn build(path: &str, required: bool) -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {path}"))?
            .try_deserialize()
            .context("invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        if self.auth.seed_admin && self.auth.admin_username.trim().is_empty() {
            bail!("auth.admin_username must be set when auth.seed_admin is enabled");
        }
        Ok(())
    }

    /// Address to bind the HTTP listener to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.server.host, self.server.port))
    }
}
