//! Login, token lifecycle and admin management over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use sitehub_entity::account::Role;

use crate::helpers::{PASSWORD, TestApp};

fn new_admin(username: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": PASSWORD,
        "confirm_password": PASSWORD,
        "first_name": "Ada",
        "is_admin": true,
    })
}

#[tokio::test]
async fn test_login_returns_tokens_and_role() {
    let app = TestApp::new().await;
    app.create_account("root", Role::SuperAdmin).await;

    let body = app.login_body("root").await;
    assert!(body["access"].is_string());
    assert!(body["refresh"].is_string());
    assert_eq!(body["role"], "Super Admin");
    assert_eq!(body["username"], "root");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new().await;
    app.create_account("root", Role::SuperAdmin).await;

    let response = app
        .request(
            "POST",
            "/api/v1/admin/login/",
            Some(json!({ "username": "root", "password": "wrong" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_anonymous_admin_listing_is_rejected() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/v1/admins/", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["message"],
        "Authentication credentials were not provided."
    );

    let response = app
        .request("GET", "/api/v1/admins/", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_only_super_admin_creates_admins() {
    let app = TestApp::new().await;
    app.create_account("root", Role::SuperAdmin).await;
    let admin = app.admin_token("editor").await;

    let response = app
        .request("POST", "/api/v1/admin/create/", Some(new_admin("intruder")), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let root = app.login("root").await;
    let response = app
        .request("POST", "/api/v1/admin/create/", Some(new_admin("writer")), Some(&root))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["username"], "writer");
    assert!(response.body.get("password_hash").is_none());

    let response = app.request("GET", "/api/v1/admins/", None, Some(&root)).await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .expect("admin list")
        .iter()
        .filter_map(|a| a["username"].as_str())
        .collect();
    assert!(names.contains(&"writer"));
    assert!(names.contains(&"editor"));
}

#[tokio::test]
async fn test_deleted_admin_token_is_rejected() {
    let app = TestApp::new().await;
    app.create_account("root", Role::SuperAdmin).await;
    let root = app.login("root").await;
    let ops = app.admin_token("ops").await;
    let ops_id = app
        .stores
        .accounts
        .find_by_username("ops")
        .await
        .unwrap()
        .unwrap()
        .id;

    let response = app
        .request("DELETE", &format!("/api/v1/admin/delete/{ops_id}/"), None, Some(&root))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", "/api/v1/apply/", None, Some(&ops)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let response = app.request("GET", "/api/v1/dashboard/stats/", None, Some(&ops)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_demoted_super_admin_loses_privileges() {
    let app = TestApp::new().await;
    app.create_account("root", Role::SuperAdmin).await;
    let root = app.login("root").await;
    let root_id = app
        .stores
        .accounts
        .find_by_username("root")
        .await
        .unwrap()
        .unwrap()
        .id;

    let response = app
        .request(
            "PATCH",
            &format!("/api/v1/admin/{root_id}/"),
            Some(json!({ "is_super_admin": false })),
            Some(&root),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["role"], "Admin");

    let response = app
        .request("POST", "/api/v1/admin/create/", Some(new_admin("writer")), Some(&root))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", "/api/v1/apply/", None, Some(&root)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_mismatched_confirmation_is_rejected() {
    let app = TestApp::new().await;
    app.create_account("root", Role::SuperAdmin).await;
    let root = app.login("root").await;

    let mut body = new_admin("writer");
    body["confirm_password"] = json!("Other@Pass1");
    let response = app
        .request("POST", "/api/v1/admin/create/", Some(body), Some(&root))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_refresh_rotates_and_logout_revokes() {
    let app = TestApp::new().await;
    app.create_account("root", Role::SuperAdmin).await;
    let login = app.login_body("root").await;
    let refresh = login["refresh"].as_str().expect("refresh").to_string();

    let response = app
        .request("POST", "/api/v1/token/refresh/", Some(json!({ "refresh": refresh })), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let access = response.body["access"].as_str().expect("access").to_string();
    let rotated = response.body["refresh"].as_str().expect("refresh").to_string();

    // The used refresh token cannot be replayed.
    let response = app
        .request("POST", "/api/v1/token/refresh/", Some(json!({ "refresh": refresh })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/v1/admin/logout/",
            Some(json!({ "refresh": rotated })),
            Some(&access),
        )
        .await;
    assert_eq!(response.status, StatusCode::RESET_CONTENT);

    let response = app
        .request("POST", "/api/v1/token/refresh/", Some(json!({ "refresh": rotated })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_refresh_token() {
    let app = TestApp::new().await;
    let access = app.admin_token("editor").await;

    let response = app
        .request("POST", "/api/v1/admin/logout/", Some(json!({})), Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Refresh token is required.");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/v1/health/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
