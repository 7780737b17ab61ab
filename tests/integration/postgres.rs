//! Storage tests against a real PostgreSQL instance.

use todo_backend::config::Config;
use todo_backend::db;
use todo_backend::todo::{PgTodoRepository, TodoRepository};

async fn repository() -> PgTodoRepository {
    let config = Config::load().expect("config");
    let pool = db::create_pool(&config).await.expect("connect");
    db::init_schema(&pool).await.expect("schema");
    PgTodoRepository::new(pool)
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn schema_init_is_idempotent() {
    let repo = repository().await;
    let before = repo.list().await.unwrap().len();

    db::init_schema(repo.pool()).await.unwrap();
    db::init_schema(repo.pool()).await.unwrap();

    assert_eq!(repo.list().await.unwrap().len(), before);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn create_then_list_round_trip() {
    let repo = repository().await;

    let created = repo.create("integration item").await.unwrap();
    assert_eq!(created.title, "integration item");
    assert!(!created.done);

    let listed = repo.list().await.unwrap();
    assert_eq!(listed.first(), Some(&created));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn ids_increase_and_list_is_descending() {
    let repo = repository().await;

    let first = repo.create("first").await.unwrap();
    let second = repo.create("second").await.unwrap();
    assert!(second.id > first.id);

    let listed = repo.list().await.unwrap();
    assert!(listed.windows(2).all(|pair| pair[0].id > pair[1].id));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn ping_succeeds() {
    let repo = repository().await;
    db::ping(repo.pool()).await.unwrap();
}
