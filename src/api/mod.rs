//! HTTP API module for the todo endpoints, health, metrics, and API docs.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use docs::ApiDoc;
pub use handlers::AppState;
pub use routes::create_router;
