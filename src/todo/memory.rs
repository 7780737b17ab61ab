//! In-memory todo store.
//!
//! Used by the test-suite and by `serve --in-memory` for running the API
//! without PostgreSQL. Ids come from an atomic sequence so concurrent
//! creates never share an id.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StorageError;

use super::repository::TodoRepository;
use super::types::Todo;

/// Todo store kept in process memory.
#[derive(Debug, Clone)]
pub struct MemoryTodoRepository {
    /// Items by id.
    items: Arc<DashMap<i32, Todo>>,
    /// Last id handed out.
    last_id: Arc<AtomicI32>,
    /// When set, every call fails as if the database were down.
    unavailable: Arc<AtomicBool>,
}

impl MemoryTodoRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            items: Arc::new(DashMap::new()),
            last_id: Arc::new(AtomicI32::new(0)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Simulate the store going down (or coming back).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, StorageError> {
        self.check_available()?;

        let mut todos: Vec<Todo> = self.items.iter().map(|entry| entry.value().clone()).collect();
        todos.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(todos)
    }

    async fn create(&self, title: &str) -> Result<Todo, StorageError> {
        self.check_available()?;

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let todo = Todo {
            id,
            title: title.to_string(),
            done: false,
        };
        self.items.insert(id, todo.clone());
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn list_is_empty_initially() {
        let repo = MemoryTodoRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = MemoryTodoRepository::new();
        let first = repo.create("first").await.unwrap();
        let second = repo.create("second").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.done);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let repo = MemoryTodoRepository::new();
        for title in ["a", "b", "c"] {
            repo.create(title).await.unwrap();
        }

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|todo| todo.title)
            .collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let repo = MemoryTodoRepository::new();
        repo.set_unavailable(true);

        assert!(matches!(repo.list().await, Err(StorageError::Unavailable(_))));
        assert!(matches!(repo.create("x").await, Err(StorageError::Unavailable(_))));
        assert!(repo.is_empty());

        repo.set_unavailable(false);
        assert!(repo.create("x").await.is_ok());
    }
}
