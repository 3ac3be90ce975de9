//! School Records Backend
//!
//! REST CRUD endpoints for users, teachers, students, events and appointments,
//! each collection persisted as a JSON file.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod schema;

use std::sync::Arc;

use axum::{extract::Request, http::Uri, routing::get, Router, ServiceExt};
use tower::{Layer, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Collections;
use errors::AppError;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub collections: Arc<Collections>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting School Records Backend");
    tracing::info!("Data directory: {:?}", config.data_dir);
    tracing::info!("Storage backend: {:?}", config.storage);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Load every collection
    let collections = Arc::new(Collections::open(&config).await?);

    let state = AppState { collections };

    // Build app
    let app = create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}

/// Wrap the router so `/users/` routes like `/users`.
///
/// Normalization must see the request before routing does.
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health_check))
        // Schema metadata
        .route("/schemas", get(api::list_schemas))
        .route("/schemas/{entity}", get(api::get_schema));

    // One route set per entity: /users, /teachers, /students, /events, /appointments
    for repo in state.collections.iter() {
        app = app.nest(&repo.schema().path(), api::entity_routes(Arc::clone(repo)));
    }

    app.fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Answer unknown paths with the `{erro}` body.
async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Rota '{}' não encontrada", uri.path()))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
