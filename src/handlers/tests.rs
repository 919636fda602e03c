use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tower::ServiceExt;

use crate::api_router;
use crate::services::Store;

async fn test_app() -> (Router, SqlitePool) {
    // Single connection keeps the in-memory database alive across requests
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = Store::new(pool.clone());
    store.init_schema().await.unwrap();
    (api_router().with_state(store), pool)
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let (app, pool) = test_app().await;

    let payload = json!({ "name": "Ann", "email": "ann@x.com", "password": "pw" });
    let (status, _) = request(&app, Method::POST, "/api/auth/signup", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(&app, Method::POST, "/api/auth/signup", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = 'ann@x.com'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (app, _pool) = test_app().await;

    let signup = json!({ "name": "Bob", "email": "bob@x.com", "password": "right" });
    let (status, _) = request(&app, Method::POST, "/api/auth/signup", Some(signup)).await;
    assert_eq!(status, StatusCode::CREATED);

    let login = json!({ "email": "bob@x.com", "password": "wrong" });
    let (status, body) = request(&app, Method::POST, "/api/auth/login", Some(login)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_returns_full_user_record() {
    let (app, _pool) = test_app().await;

    let signup = json!({ "name": "Cay", "email": "cay@x.com", "password": "pw" });
    request(&app, Method::POST, "/api/auth/signup", Some(signup)).await;

    let login = json!({ "email": "cay@x.com", "password": "pw" });
    let (status, body) = request(&app, Method::POST, "/api/auth/login", Some(login)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "cay@x.com");
    // The stored password comes back verbatim
    assert_eq!(body["user"]["password"], "pw");
}

#[tokio::test]
async fn create_task_without_title_is_rejected() {
    let (app, _pool) = test_app().await;

    for payload in [json!({}), json!({ "title": "" })] {
        let (status, body) = request(&app, Method::POST, "/api/tasks", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Title is required");
    }

    let (status, body) = request(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_task_fills_defaults() {
    let (app, _pool) = test_app().await;

    let (status, body) =
        request(&app, Method::POST, "/api/tasks", Some(json!({ "title": "Only title" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["title"], "Only title");
    assert_eq!(body["description"], "");
    assert_eq!(body["due_date"], today());
    assert_eq!(body["priority"], "Medium");
    assert_eq!(body["status"], "pending");
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn completion_toggle_on_missing_task_is_not_found() {
    let (app, _pool) = test_app().await;

    let (status, body) = request(
        &app,
        Method::PUT,
        "/api/tasks/complete/999",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");
}

#[tokio::test]
async fn deleted_task_no_longer_listed_for_user() {
    let (app, _pool) = test_app().await;

    let (_, created) = request(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({ "user_id": 7, "title": "Ephemeral" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) =
        request(&app, Method::DELETE, &format!("/api/tasks/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted");

    let (status, body) = request(&app, Method::GET, "/api/tasks/7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_preserves_status_and_identifier() {
    let (app, _pool) = test_app().await;

    let (_, created) = request(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({ "user_id": 2, "title": "Before" })),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/api/tasks/complete/{}", id),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let update = json!({
        "title": "After",
        "description": "edited",
        "due_date": "2026-09-01",
        "priority": "High"
    });
    let (status, body) =
        request(&app, Method::PUT, &format!("/api/tasks/{}", id), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "After");
    assert_eq!(body["description"], "edited");
    assert_eq!(body["due_date"], "2026-09-01");
    assert_eq!(body["priority"], "High");
    assert_eq!(body["status"], "completed");
    assert_eq!(body["user_id"], 2);
}

#[tokio::test]
async fn update_missing_task_is_not_found() {
    let (app, _pool) = test_app().await;

    let (status, body) = request(
        &app,
        Method::PUT,
        "/api/tasks/42",
        Some(json!({ "title": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");
}

#[tokio::test]
async fn full_task_lifecycle() {
    let (app, _pool) = test_app().await;

    let signup = json!({ "name": "A", "email": "a@x.com", "password": "pw" });
    let (status, _) = request(&app, Method::POST, "/api/auth/signup", Some(signup)).await;
    assert_eq!(status, StatusCode::CREATED);

    let login = json!({ "email": "a@x.com", "password": "pw" });
    let (status, body) = request(&app, Method::POST, "/api/auth/login", Some(login)).await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["user"]["id"].as_i64().unwrap();

    let (status, created) = request(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({ "user_id": user_id, "title": "T1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = created["id"].as_i64().unwrap();

    let uri = format!("/api/tasks/{}", user_id);
    let (_, listed) = request(&app, Method::GET, &uri, None).await;
    assert_eq!(listed[0]["title"], "T1");
    assert_eq!(listed[0]["status"], "pending");

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/api/tasks/complete/{}", task_id),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = request(&app, Method::GET, &uri, None).await;
    assert_eq!(listed[0]["status"], "completed");

    let (status, _) =
        request(&app, Method::DELETE, &format!("/api/tasks/{}", task_id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = request(&app, Method::GET, &uri, None).await;
    assert_eq!(listed, json!([]));
}
