// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use exercise_tracker::config::Config;
use exercise_tracker::db::{FirestoreDb, Store};
use exercise_tracker::routes::create_router;
use exercise_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(Store::in_memory())
}

/// Create a test app whose store is disconnected (every store call fails).
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(Store::Firestore(FirestoreDb::new_mock()))
}

/// Create an in-memory test app with a custom configuration.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config,
        db: Store::in_memory(),
    });

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
fn create_test_app_with_store(db: Store) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::default(),
        db,
    });

    (create_router(state.clone()), state)
}

/// Build a form-encoded POST request.
#[allow(dead_code)]
pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request.
#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Register `username` through the API and return the new user's id.
#[allow(dead_code)]
pub async fn register(app: &axum::Router, username: &str) -> String {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(form_post("/api/users", &format!("username={}", username)))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    json_body(response).await["_id"]
        .as_str()
        .expect("registration should return an id")
        .to_string()
}

/// Log an exercise through the API, asserting success.
#[allow(dead_code)]
pub async fn log_exercise(app: &axum::Router, user_id: &str, body: &str) -> serde_json::Value {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(form_post(&format!("/api/users/{}/exercises", user_id), body))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    json_body(response).await
}
