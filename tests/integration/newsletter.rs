//! Newsletter subscription and broadcast over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use sitehub_entity::account::Role;

use crate::helpers::TestApp;

async fn subscribe(app: &TestApp, email: &str) -> crate::helpers::TestResponse {
    app.request("POST", "/api/v1/subscribe/", Some(json!({ "email": email })), None)
        .await
}

#[tokio::test]
async fn test_subscribe_twice() {
    let app = TestApp::new().await;

    let response = subscribe(&app, "reader@example.com").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body, json!({ "message": "Subscription successful!" }));

    let response = subscribe(&app, "reader@example.com").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "error": "Email already subscribed!" }));
}

#[tokio::test]
async fn test_unsubscribe_removes_record() {
    let app = TestApp::new().await;
    subscribe(&app, "reader@example.com").await;

    let response = app
        .request("POST", "/api/v1/unsubscribe/reader%40example.com/", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let response = app
        .request("POST", "/api/v1/unsubscribe/reader@example.com/", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        json!({ "success": false, "message": "Email not found." })
    );
}

#[tokio::test]
async fn test_broadcast_reaches_active_subscribers() {
    let app = TestApp::new().await;
    app.create_account("root", Role::SuperAdmin).await;
    let token = app.login("root").await;
    subscribe(&app, "a@example.com").await;
    subscribe(&app, "b@example.com").await;

    let body = json!({ "subject": "Monthly", "htmlContent": "<p>News</p>" });
    let response = app
        .request("POST", "/api/v1/send-newsletter/", Some(body.clone()), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("POST", "/api/v1/send-newsletter/", Some(body), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "message": "Newsletter sent successfully!", "recipients": 2 })
    );

    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bcc.len(), 2);
    assert_eq!(sent[0].text, "News");
}

#[tokio::test]
async fn test_subscriber_admin() {
    let app = TestApp::new().await;
    let token = app.admin_token("editor").await;
    subscribe(&app, "a@example.com").await;

    let response = app
        .request("GET", "/api/v1/list/subscribers/", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let id = response.body[0]["id"].as_str().expect("subscriber id").to_string();

    let path = format!("/api/v1/subscribers/delete/{id}/");
    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
