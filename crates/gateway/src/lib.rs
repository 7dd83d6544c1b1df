//! HTTP gateway for the template fill service
//!
//! Routes:
//! - `GET    /health` — liveness + version
//! - `POST   /api/v1/fill` — render a template (inline base64 or stored id)
//! - `POST   /api/v1/templates` — upload, scan, and persist a template
//! - `GET    /api/v1/templates` — list stored template summaries
//! - `GET    /api/v1/templates/{id}` — one template's metadata and fields
//! - `DELETE /api/v1/templates/{id}` — remove a stored template

mod config;
mod handlers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use field_store::FieldStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, GatewayConfig, StorageBackend};
pub use handlers::*;
pub use types::*;

/// Shared state for all handlers
#[derive(Clone)]
pub struct ApiState {
    /// Template persistence backend, chosen at startup
    pub store: Arc<dyn FieldStore>,
    /// Key checked against incoming requests
    pub api_key: String,
}

impl ApiState {
    pub fn new(store: Arc<dyn FieldStore>, api_key: impl Into<String>) -> Self {
        Self {
            store,
            api_key: api_key.into(),
        }
    }
}

/// Build the API router with all endpoints
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/fill", post(fill))
        .route(
            "/api/v1/templates",
            get(list_templates).post(upload_template),
        )
        .route(
            "/api/v1/templates/{id}",
            get(get_template).delete(delete_template),
        )
        // The original UI is served from another origin; stay permissive
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway on the given address
pub async fn start_server(addr: &str, state: ApiState) -> Result<(), std::io::Error> {
    tracing::info!("Starting smartdoc gateway on {}", addr);

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await
}
