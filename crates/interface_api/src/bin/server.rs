//! Salary Advance API server binary
//!
//! # Usage
//!
//! ```bash
//! # Demo mode (in-memory stores, state lost on restart)
//! cargo run --bin salary-advance-api
//!
//! # Against PostgreSQL
//! API_DATABASE_URL=postgres://... cargo run --bin salary-advance-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string; empty selects demo mode
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_ADMIN_EMAIL` / `API_ADMIN_PASSWORD` - Admin login credentials
//! * `API_DEMO_CUSTOMER_ID` - Customer identity for unauthenticated calls

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_employee::InMemoryEmployeeStore;
use domain_lending::InMemoryApplicationStore;
use infra_store::{create_pool_from_url, PgApplicationStore, PgEmployeeStore};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().unwrap_or_default();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = config.port,
        "starting salary advance API server"
    );

    let state = build_state(config.clone()).await?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("invalid server address")?;

    tracing::info!(%addr, "server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Picks store adapters from configuration: PostgreSQL when a database URL
/// is configured, otherwise in-memory demo mode
async fn build_state(config: ApiConfig) -> anyhow::Result<AppState> {
    if config.database_url.is_empty() {
        tracing::warn!("no database configured, running in-memory demo mode");
        return Ok(AppState::new(
            Arc::new(InMemoryApplicationStore::new()),
            Arc::new(InMemoryEmployeeStore::new()),
            config,
        ));
    }

    let pool = create_pool_from_url(&config.database_url)
        .await
        .context("failed to connect to database")?;

    Ok(AppState::new(
        Arc::new(PgApplicationStore::new(pool.clone())),
        Arc::new(PgEmployeeStore::new(pool)),
        config,
    ))
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM so in-flight requests can complete
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => {
                tracing::error!("failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }
}
