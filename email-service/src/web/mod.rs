//! HTTP surface for the email store
//!
//! JSON in, JSON out. Errors are `{"detail": "..."}` with 422 for bad input,
//! 404 for a missing email and 500 for storage failures.

pub mod api;
pub mod state;

use anyhow::{Context, Result};
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::store::EmailStore;
pub use state::AppState;

/// Bind the listener and serve until ctrl-c
pub async fn serve(config: &ServerConfig, store: EmailStore) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Email service listening on http://{}", listener.local_addr()?);

    let app = create_router(AppState::new(store));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Email service stopped");
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/send", post(api::send_email))
        .route("/emails", get(api::list_emails))
        .route("/emails/unread", get(api::list_unread))
        .route("/emails/search", get(api::search_emails))
        .route("/emails/filter", get(api::filter_emails))
        .route("/emails/:id", get(api::get_email).delete(api::delete_email))
        .route("/emails/:id/read", patch(api::mark_read))
        .route("/emails/:id/unread", patch(api::mark_unread))
        .route(
            "/reset_database",
            get(api::reset_database).post(api::reset_database),
        )
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
