//! Todo list backend.
//!
//! A small HTTP service that stores todo items in PostgreSQL and exposes
//! them as JSON:
//!
//! ```text
//! GET  /api/health  -> { "ok": true, "service": "backend", "timestamp": "..." }
//! GET  /api/todos   -> [ { "id": 2, "title": "...", "done": false }, ... ]
//! POST /api/todos   -> 201 { "id": 3, "title": "...", "done": false }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Error types and their HTTP mapping
//! - [`todo`]: Todo records and storage
//! - [`db`]: PostgreSQL pool and schema setup
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod todo;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, StartupError, StorageError};
