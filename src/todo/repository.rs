//! Storage trait for todo items and its PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::error::StorageError;

use super::types::Todo;

/// Storage for todo items.
///
/// Every method is a single round-trip to the store; nothing is cached
/// between calls.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All items, newest (highest id) first.
    async fn list(&self) -> Result<Vec<Todo>, StorageError>;

    /// Insert a new item with `done = false` and return the stored row.
    async fn create(&self, title: &str) -> Result<Todo, StorageError>;
}

/// Todo storage backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, StorageError> {
        let todos = sqlx::query_as::<_, Todo>("SELECT id, title, done FROM todos ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        debug!(count = todos.len(), "fetched todos");
        Ok(todos)
    }

    async fn create(&self, title: &str) -> Result<Todo, StorageError> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title) VALUES ($1) RETURNING id, title, done",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = todo.id, "inserted todo");
        Ok(todo)
    }
}
