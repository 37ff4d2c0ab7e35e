//! `POST /users` authorisation and payload shape.
use axum::http::StatusCode;
use credgate_backend_lib::storage::Storage;
use credgate_common::UsersResponse;
use serde_json::json;

use crate::test_utils::{json_body, post_json, post_raw, setup_test_app, setup_test_app_with, test_settings};

#[tokio::test]
async fn test_seeded_admin_logs_in() {
    let (state, app) = setup_test_app().await;
    assert_eq!(state.storage.len().await.unwrap(), 1);

    let (status, body) =
        post_json(&app, "/login", json!({"username": "admin", "password": "Admin123"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["role"], "admin");
}

#[tokio::test]
async fn test_listing_requires_admin() {
    let (_state, app) = setup_test_app().await;
    post_json(&app, "/registro", json!({"username": "alice", "password": "Passw0rd"})).await;

    let (status, body) = post_json(&app, "/users", json!({"username": "alice"})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json_body(&body), json!({"success": false, "message": "Acceso denegado"}));

    let (status, _) = post_json(&app, "/users", json!({"username": "ghost"})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = post_json(&app, "/users", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(&body)["message"], "No autorizado");

    let (status, _) = post_raw(&app, "/users", "application/json", "[").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_listing_excludes_secrets() {
    let (_state, app) = setup_test_app().await;
    post_json(&app, "/registro", json!({"username": "alice", "password": "Passw0rd"})).await;
    post_json(&app, "/registro", json!({"username": "bob_2", "password": "Secr3tPw"})).await;

    let (status, body) = post_json(&app, "/users", json!({"username": "admin"})).await;
    assert_eq!(status, StatusCode::OK);

    let raw = String::from_utf8(body.to_vec()).unwrap();
    assert!(!raw.contains("salt"));
    assert!(!raw.contains("hash"));

    let listing: UsersResponse = serde_json::from_slice(&body).unwrap();
    assert!(listing.success);
    assert_eq!(listing.total_users, 3);
    let names: Vec<&str> = listing.users.iter().map(|u| u.username.as_str()).collect();
    assert!(names.contains(&"admin"));
    assert!(names.contains(&"alice"));
    assert!(names.contains(&"bob_2"));
    for user in &listing.users {
        let expected = if user.username == "admin" { "admin" } else { "user" };
        assert_eq!(user.role, expected);
    }
}

#[tokio::test]
async fn test_no_admin_without_seeding() {
    let mut settings = test_settings();
    settings.auth.seed_admin = false;
    let (state, app) = setup_test_app_with(settings).await;

    assert_eq!(state.storage.len().await.unwrap(), 0);
    let (status, _) = post_json(&app, "/users", json!({"username": "admin"})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
