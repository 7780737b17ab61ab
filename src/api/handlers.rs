//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorBody, Result};
use crate::metrics;
use crate::todo::{CreateTodo, Todo, TodoRepository};
use crate::utils::iso_timestamp;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "backend";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Todo storage.
    pub todos: Arc<dyn TodoRepository>,
    /// Prometheus handle, present once a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state over the given store, without metrics export.
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self {
            todos,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always true.
    pub ok: bool,
    /// Service name.
    pub service: String,
    /// Current time, ISO-8601 UTC.
    pub timestamp: String,
}

/// Health check handler - always returns 200 and never touches storage.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    let _timer = metrics::timer_http("health");

    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME.to_string(),
        timestamp: iso_timestamp(Utc::now()),
    })
}

/// List all todos, newest first.
#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    responses(
        (status = 200, description = "All todos, highest id first", body = Vec<Todo>),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>> {
    let _timer = metrics::timer_http("list_todos");

    let todos = state.todos.list().await.inspect_err(|_| {
        metrics::inc_storage_errors("list");
    })?;

    debug!(count = todos.len(), "Listed todos");
    Ok(Json(todos))
}

/// Create a todo from `{ "title": ... }`.
///
/// A body that cannot be read as JSON counts as a missing title, so the
/// client always gets the same 400 answer. That includes bodies over the
/// default 2 MB extractor limit, which answer 400 rather than 413.
#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "todos",
    request_body = CreateTodo,
    responses(
        (status = 201, description = "Created todo", body = Todo),
        (status = 400, description = "Missing or falsy title", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>)> {
    let _timer = metrics::timer_http("create_todo");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            debug!(%rejection, "Unreadable create body");
            CreateTodo::default()
        }
    };

    let Some(title) = input.title() else {
        metrics::inc_validation_errors();
        return Err(ApiError::MissingTitle);
    };

    let todo = state.todos.create(&title).await.inspect_err(|_| {
        metrics::inc_storage_errors("create");
    })?;

    info!(id = todo.id, "Created todo");
    metrics::inc_todos_created();
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Prometheus scrape endpoint - 404 when no recorder is installed.
pub async fn metrics_export(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
