//! Application builder: wires router, middleware and state into an Axum app.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use sqlx::PgPool;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use sitehub_cache::CacheManager;
use sitehub_core::config::AppConfig;
use sitehub_core::error::AppError;
use sitehub_core::traits::storage::StorageProvider;
use sitehub_database::store::Stores;
use sitehub_storage::LocalStorage;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    build_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the SiteHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting SiteHub server...");

    // ── Step 1: Initialize cache ─────────────────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = CacheManager::new(&config.cache)
        .await
        .map_err(|e| AppError::internal(format!("Cache init failed: {e}")))?;

    // ── Step 2: Initialize upload storage ────────────────────────
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorage::new(&config.storage.root_path).await?);

    // ── Step 3: Initialize mail transport ────────────────────────
    let mailer = sitehub_mail::build_mailer(&config.mail)?;

    // ── Step 4: Wire stores and services ─────────────────────────
    let stores = Stores::postgres(db_pool);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let bootstrap = config.bootstrap.clone();
    let state = AppState::new(config, stores, cache, storage, mailer);

    // ── Step 5: Default super admin ──────────────────────────────
    state
        .account_service
        .ensure_default_super_admin(&bootstrap)
        .await?;

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("SiteHub server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("SiteHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
