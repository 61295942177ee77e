//! Dashboard API server.
//!
//! HTTP JSON API using Axum: row data, filtered views, aggregate counts,
//! unique values, and diagnostics over the cached spreadsheet table.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cache::TableCache;
use crate::config::DashboardConfig;
use crate::sheet::SheetFetcher;

use super::handlers;

/// API server bind configuration.
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Shared application state: the fetcher and the one mutex-guarded cache
/// slot every request goes through.
pub struct AppState {
    pub version: String,
    pub date_column: String,
    pub fetcher: SheetFetcher,
    pub cache: TableCache,
}

impl AppState {
    pub fn new(dashboard: &DashboardConfig) -> crate::error::DashboardResult<Self> {
        Ok(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            date_column: dashboard.date_column.clone(),
            fetcher: SheetFetcher::new(dashboard)?,
            cache: TableCache::new(Duration::from_secs(dashboard.cache_secs)),
        })
    }
}

/// Build the dashboard router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/data", get(handlers::api_data))
        .route("/api/filter", get(handlers::api_filter))
        .route("/api/counts", get(handlers::api_counts))
        .route("/api/unique/:field", get(handlers::api_unique))
        .route("/api/debug/columns", get(handlers::debug_columns))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server until SIGINT/SIGTERM.
pub async fn run_api_server(config: ApiConfig, dashboard: DashboardConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetboard=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(AppState::new(&dashboard)?);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Sheetboard API starting on http://{}", addr);
    info!("   Data: /api/data, /api/filter, /api/counts, /api/unique/:field");
    info!("   Diagnostics: /health, /api/debug/columns");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Sheetboard API shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
