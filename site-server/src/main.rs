//! Static site server with a liveness endpoint.
//!
//! Serves the seeded public directory and exposes the `GET /health`
//! contract the healthcheck probe consumes. Page rendering happens at
//! build time upstream; this binary only ships the built assets.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use tower_http::services::ServeDir;
use tracing::info;

#[derive(Parser)]
#[command(name = "site-server")]
#[command(about = "Serve the public site directory with a /health endpoint")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "4321")]
    port: u16,

    /// Directory of built site assets
    #[arg(long, default_value = "/app/public")]
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_server=info".parse()?),
        )
        .init();

    let args = Args::parse();
    info!(public_dir = %args.public_dir.display(), "starting site-server");

    let app = router(&args.public_dir);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(public_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
}

/// Liveness contract consumed by the healthcheck probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "healthy": true }))
}

/// Resolves when SIGINT or SIGTERM arrives (forwarded by the entrypoint).
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt()).expect("register SIGINT handler");
    let mut terminate = signal(SignalKind::terminate()).expect("register SIGTERM handler");

    tokio::select! {
        _ = interrupt.recv() => {}
        _ = terminate.recv() => {}
    }
    info!("shutdown signal received");
}
