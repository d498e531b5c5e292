mod common;

use axum::http::{Method, StatusCode};
use common::{admin_key, send, signup, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_self_service_diet_profile() {
    let app = spawn_app().await;
    let (id, key) = signup(&app, "vera@example.com").await;

    let response = send(
        &app,
        Method::GET,
        "/api/v1/users_diet_requirements/me",
        Some(&key),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user_id"], id);
    assert_eq!(response.body["is_vegan"], false);

    let response = send(
        &app,
        Method::PUT,
        "/api/v1/users_diet_requirements/me",
        Some(&key),
        Some(json!({ "is_vegan": true, "is_vegetarian": true })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(
        &app,
        Method::PUT,
        "/api/v1/users_diet_requirements/me",
        Some(&key),
        Some(json!({ "is_nut_free": true })),
    )
    .await;
    assert_eq!(response.body["is_vegan"], true);
    assert_eq!(response.body["is_vegetarian"], true);
    assert_eq!(response.body["is_nut_free"], true);
    assert_eq!(response.body["is_gluten_free"], false);

    let response = send(
        &app,
        Method::PUT,
        "/api/v1/users_diet_requirements/me",
        Some(&key),
        Some(json!({ "is_vegan": null })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_superuser_manages_other_profiles() {
    let app = spawn_app().await;
    let admin = admin_key(&app).await;
    let (id, key) = signup(&app, "walt@example.com").await;
    let uri = format!("/api/v1/users_diet_requirements/{id}");

    let response = send(
        &app,
        Method::PUT,
        &uri,
        Some(&admin),
        Some(json!({ "is_pescatarian": true })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(
        &app,
        Method::GET,
        "/api/v1/users_diet_requirements/me",
        Some(&key),
        None,
    )
    .await;
    assert_eq!(response.body["is_pescatarian"], true);

    let response = send(&app, Method::GET, &uri, Some(&key), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(
        &app,
        Method::GET,
        "/api/v1/users_diet_requirements/9999",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["detail"], "User not found");
}
