//! Axum API server for the Fission backend.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::ResponseCache;
use crate::config::ServerConfig;
use crate::generator::NameGenerator;

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator for `generate` and `deeper` requests.
    pub generator: Arc<NameGenerator>,
    /// The generator's response cache, exposed for the maintenance routes.
    pub cache: Arc<ResponseCache>,
}

impl AppState {
    pub fn new(generator: Arc<NameGenerator>) -> Self {
        let cache = generator.cache().clone();
        Self { generator, cache }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    // The browser frontend may be served from anywhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(super::routes::health::root))
        .route("/api/health", get(super::routes::health::get_health))
        // Generation
        .route("/api/generate", post(super::routes::generate::generate))
        .route("/api/deeper", post(super::routes::generate::go_deeper))
        .route("/api/suggest", post(super::routes::generate::suggest))
        // Static catalogue
        .route("/api/categories", get(super::routes::catalog::list_categories))
        .route("/api/examples", get(super::routes::catalog::list_examples))
        // Cache maintenance
        .route("/api/cache/stats", get(super::routes::cache::get_stats))
        .route("/api/cache", delete(super::routes::cache::clear_cache))
        // Body size limit: 1 MiB.
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the API server.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = build_router(state);
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Fission API server listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
