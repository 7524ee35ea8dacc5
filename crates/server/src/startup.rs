use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use service::runtime;
use tracing::{info, warn};

use crate::routes::{self, AppState};

/// Resolve the listen address from the server configuration.
fn load_bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(server.bind_addr().parse()?)
}

/// Connect the store and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(&cfg.database).await?;
    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let state = AppState::from_db(db);
    Ok(routes::build_router(state, routes::build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = load_bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, port = cfg.server.port, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
