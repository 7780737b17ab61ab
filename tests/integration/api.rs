//! End-to-end HTTP behaviour through the public router.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use todo_backend::api::{create_router, AppState};
use todo_backend::todo::{MemoryTodoRepository, Todo};

fn app(repo: &MemoryTodoRepository) -> Router {
    create_router(AppState::new(Arc::new(repo.clone())))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_todo(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/todos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_todos() -> Request<Body> {
    Request::builder()
        .uri("/api/todos")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn created_item_appears_in_list() {
    let repo = MemoryTodoRepository::new();
    let app = app(&repo);

    let (status, created) = send(&app, post_todo(r#"{"title":"Llamar al banco"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Todo = serde_json::from_value(created).unwrap();
    assert!(!created.done);

    let (status, listed) = send(&app, get_todos()).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Todo> = serde_json::from_value(listed).unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn rejected_create_leaves_list_unchanged() {
    let repo = MemoryTodoRepository::new();
    let app = app(&repo);

    send(&app, post_todo(r#"{"title":"keep"}"#)).await;

    for body in ["{}", r#"{"title":""}"#, r#"{"title":null}"#, r#"{"title":false}"#] {
        let (status, error) = send(&app, post_todo(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(error["error"], "title requerido");
    }

    let (_, listed) = send(&app, get_todos()).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_is_ordered_newest_first() {
    let repo = MemoryTodoRepository::new();
    let app = app(&repo);

    for n in 1..=5 {
        send(&app, post_todo(&format!(r#"{{"title":"item {n}"}}"#))).await;
    }

    let (_, listed) = send(&app, get_todos()).await;
    let listed: Vec<Todo> = serde_json::from_value(listed).unwrap();
    let ids: Vec<i32> = listed.iter().map(|todo| todo.id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    assert_eq!(listed[0].title, "item 5");
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let repo = MemoryTodoRepository::new();
    let app = app(&repo);

    let tasks: Vec<_> = (0..32)
        .map(|n| {
            let app = app.clone();
            tokio::spawn(async move { send(&app, post_todo(&format!(r#"{{"title":"t{n}"}}"#))).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        ids.insert(body["id"].as_i64().unwrap());
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(repo.len(), 32);
}

#[tokio::test]
async fn outage_fails_todos_but_not_health() {
    let repo = MemoryTodoRepository::new();
    let app = app(&repo);
    repo.set_unavailable(true);

    let (status, body) = send(&app, get_todos()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "DB error");

    let (status, body) = send(
        &app,
        Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}
