//! OpenAPI description of the HTTP API.

use axum::Json;
use utoipa::OpenApi;

use super::handlers::{self, HealthResponse};
use crate::error::ErrorBody;
use crate::todo::{CreateTodo, Todo};

/// OpenAPI document for the public endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::list_todos, handlers::create_todo),
    components(schemas(Todo, CreateTodo, HealthResponse, ErrorBody)),
    tags(
        (name = "health", description = "Liveness"),
        (name = "todos", description = "Todo items")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
