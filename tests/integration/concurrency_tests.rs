//! Concurrent access to the shared credential store.
use axum::http::StatusCode;
use credgate_backend_lib::storage::Storage;
use futures_util::future::join_all;
use serde_json::json;

use crate::test_utils::{post_json, setup_test_app};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_registrations_create_one_account() {
    let (state, app) = setup_test_app().await;

    let attempts = (0..16).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            post_json(
                &app,
                "/registro",
                json!({"username": "racer", "password": format!("Passw0rd{i}")}),
            )
            .await
            .0
        })
    });

    let statuses: Vec<StatusCode> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, statuses.len() - 1);
    // seeded admin plus the single winner
    assert_eq!(state.storage.len().await.unwrap(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_distinct_registrations() {
    let (state, app) = setup_test_app().await;

    let attempts = (0..20).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            post_json(
                &app,
                "/registro",
                json!({"username": format!("user_{i}"), "password": "Passw0rd"}),
            )
            .await
            .0
        })
    });

    for joined in join_all(attempts).await {
        assert_eq!(joined.unwrap(), StatusCode::CREATED);
    }
    assert_eq!(state.storage.len().await.unwrap(), 21);
}
