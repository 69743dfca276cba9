mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use velvet_api::state::AppStateInner;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "velvet=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    match velvet_db::ProfileDb::locate(&config.gateway.db_candidates) {
        Some(path) => info!("Bot database found at {}", path.display()),
        None => warn!(
            "No bot database among {:?}, stats will read as zero",
            config.gateway.db_candidates
        ),
    }

    let state = Arc::new(AppStateInner::new(config.gateway.clone())?);

    let mut app: Router = velvet_api::router(state);
    if config.static_dir.is_dir() {
        info!("Serving landing page from {}", config.static_dir.display());
        let index = config.static_dir.join("index.html");
        app = app.fallback_service(
            ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)),
        );
    } else {
        warn!(
            "Static directory {} not found, serving API only",
            config.static_dir.display()
        );
    }

    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Velvet gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
