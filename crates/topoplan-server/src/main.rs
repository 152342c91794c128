//! Planning service entry point.
//!
//! Endpoints:
//!   POST /generate_topology
//!   GET  /health
//!
//! Listens on 0.0.0.0:8080 (`TOPOPLAN_PORT` overrides). Successful plans
//! are archived under `results/` (`TOPOPLAN_RESULTS_DIR` overrides).

mod persist;
mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

const DEFAULT_PORT: u16 = 8080;

/// Shared state handed to every handler.
pub struct AppContext {
    /// Directory successful plans are archived into.
    pub results_dir: PathBuf,
}

fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/generate_topology", post(routes::generate_topology))
        .route("/health", get(routes::health))
        .with_state(ctx)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let port = std::env::var("TOPOPLAN_PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let results_dir = std::env::var("TOPOPLAN_RESULTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("results"));

    let ctx = Arc::new(AppContext { results_dir });
    let router = build_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("topology planner listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
