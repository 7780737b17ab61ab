//! Todo items and their storage.
//!
//! This module handles:
//! - The todo record and the create payload
//! - The storage trait used by the HTTP handlers
//! - PostgreSQL and in-memory implementations of that trait

pub mod memory;
pub mod repository;
pub mod types;

pub use memory::MemoryTodoRepository;
pub use repository::{PgTodoRepository, TodoRepository};
pub use types::{CreateTodo, Todo};
