//! Tracing subscriber setup.
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogSettings;

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(settings: &LogSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    let builder = fmt().with_env_filter(filter).with_target(true);
    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
