use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use credgate_backend_lib::{config::Settings, logging, router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Username/password authentication server
#[derive(Parser, Debug)]
#[command(name = "credgate", version, about)]
struct Cli {
    /// Configuration file (defaults to config/default.toml if present)
    #[arg(short, long, env = "CREDGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit JSON formatted logs
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    settings.log.json |= cli.json_logs;
    settings.validate()?;

    logging::init(&settings.log)?;

    let addr = settings.bind_addr()?;
    let state = Arc::new(AppState::in_memory(&settings).await?);
    let app = router::create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "credgate listening");

    if settings.server.trust_proxy_headers {
        info!("client addresses taken from x-real-ip / x-forwarded-for");
    }

    // peer addresses key the login lockout
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
