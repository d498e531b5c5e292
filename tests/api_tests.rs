mod common;

use axum::http::{Method, StatusCode};
use common::{
    ADMIN_EMAIL, ADMIN_PASSWORD, admin_key, login, send, signup, spawn_app, spawn_app_with,
    test_config,
};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app().await;
    let response = send(&app, Method::GET, "/api/v1", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "message": "Hello World" }));
}

#[tokio::test]
async fn test_protected_routes_require_credentials() {
    let app = spawn_app().await;

    let response = send(&app, Method::GET, "/api/v1/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["detail"], "Could not validate credentials");

    let response = send(&app, Method::GET, "/api/v1/users/me", Some("wrong-key"), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let key = admin_key(&app).await;
    let response = send(&app, Method::GET, "/api/v1/users/me", Some(&key), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "admin@admin.com");
    assert_eq!(response.body["is_superuser"], true);
    assert!(response.body.get("password_hash").is_none());
    assert!(response.body.get("api_key").is_none());
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = spawn_app().await;
    let key = admin_key(&app).await;

    let request = axum::http::Request::builder()
        .uri("/api/v1/users/me")
        .header("Authorization", format!("Bearer {key}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_cookie_authenticates_until_logout() {
    let app = spawn_app().await;

    let response = login(&app, "admin@admin.com", "change-me").await;
    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.headers["set-cookie"]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let request = axum::http::Request::builder()
        .uri("/api/v1/users/me")
        .header("Cookie", &cookie)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .header("Cookie", &cookie)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = axum::http::Request::builder()
        .uri("/api/v1/users/me")
        .header("Cookie", &cookie)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_login() {
    let app = spawn_app().await;
    let response = login(&app, "admin@admin.com", "not-the-password").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["detail"], "Incorrect email or password");
}

#[tokio::test]
async fn test_superuser_routes_forbid_regular_users() {
    let app = spawn_app().await;
    let (_, key) = signup(&app, "regular@example.com").await;

    for uri in ["/api/v1/users", "/api/v1/meals", "/api/v1/metrics", "/api/v1/users/1"] {
        let response = send(&app, Method::GET, uri, Some(&key), None).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(response.body["detail"], "The user doesn't have enough privileges");
    }
}

#[tokio::test]
async fn test_inactive_user_is_locked_out() {
    let app = spawn_app().await;
    let admin = admin_key(&app).await;
    let (id, key) = signup(&app, "sleepy@example.com").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/v1/users/{id}"),
        Some(&admin),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(&app, Method::GET, "/api/v1/users/me", Some(&key), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["detail"], "Inactive user");
}

#[tokio::test]
async fn test_invalid_limit_is_rejected() {
    let app = spawn_app().await;
    let admin = admin_key(&app).await;
    let response = send(&app, Method::GET, "/api/v1/ingredients?limit=0", Some(&admin), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_cookie_follows_server_config() {
    let mut config = test_config();
    config.server.secure_cookies = true;
    let app = spawn_app_with(config).await;
    let response = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let cookie = response.headers["set-cookie"].to_str().unwrap().to_string();
    assert!(cookie.contains("Secure"), "{cookie}");

    let mut config = test_config();
    config.server.secure_cookies = false;
    let app = spawn_app_with(config).await;
    let response = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let cookie = response.headers["set-cookie"].to_str().unwrap().to_string();
    assert!(!cookie.contains("Secure"), "{cookie}");
}
