//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::docs::openapi_json;
use super::handlers::{create_todo, health, list_todos, metrics_export, AppState};

/// Create the API router.
///
/// Every response, including CORS preflight answers, allows any origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/api/health", get(health))
        // Todo endpoints
        .route("/api/todos", get(list_todos).post(create_todo))
        // Observability and docs
        .route("/metrics", get(metrics_export))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
