//! empresa_server — REST server for the company registry.
//!
//! Configuration comes from environment variables; see `config`.

use anyhow::Context;
use empresa_core::{init_logging, Database};
use empresa_server::config::ServerConfig;
use empresa_server::router::build_router;
use empresa_server::AppState;
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let database = Database::bootstrap(&config.database_path).with_context(|| {
        format!(
            "failed to prepare database at `{}`",
            config.database_path.display()
        )
    })?;

    let app = build_router(AppState::new(database));
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok bind_addr={}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=signal_listen module=server status=error error={err}");
    }
}
