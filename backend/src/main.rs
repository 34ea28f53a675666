//! Service Roster Backend
//!
//! A REST API for recording which volunteer serves at each day, time, and
//! service slot, plus the static client application.

use service_roster_backend::app::build_router;
use service_roster_backend::config::Config;
use service_roster_backend::state::AppState;
use service_roster_backend::storage::AssignmentDb;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    if config.admin.pin.is_none() {
        warn!("ADMIN_PIN is not set; clearing assignments is disabled");
    }

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    // Open storage; failure here is fatal
    let db = Arc::new(AssignmentDb::open(&config.storage.db_path).await?);
    info!("Assignments stored in {}", db.path());

    let result = serve(addr, db.clone(), &config).await;

    // Flush the write-ahead log and release the database on every exit path
    if let Err(e) = db.close().await {
        error!("Failed to close database cleanly: {}", e);
    }

    result?;
    info!("Server shutdown complete");
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives
async fn serve(addr: SocketAddr, db: Arc<AssignmentDb>, config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(db, config);
    let app = build_router(state, &config.server.static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🚀 Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
