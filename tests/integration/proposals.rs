//! Proposal requests and their delivery over HTTP.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

async fn submit(app: &TestApp, email: Option<&str>) -> String {
    let response = app
        .request(
            "POST",
            "/api/v1/proposals/",
            Some(json!({
                "name": "Acme Ltd",
                "email": email,
                "service_interest": "web_development",
                "details": "A new storefront",
                "status": "sent",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"], "pending");
    response.body["id"].as_str().expect("proposal id").to_string()
}

async fn fetch(app: &TestApp, id: &str, token: &str) -> Value {
    let response = app
        .request("GET", &format!("/api/v1/proposals/{id}/"), None, Some(token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body
}

async fn send(app: &TestApp, id: &str, token: &str) -> crate::helpers::TestResponse {
    app.multipart(
        &format!("/api/v1/proposals/{id}/send_proposal/"),
        &[("admin_response", "Our offer")],
        Some(("proposal_document", "offer.pdf", &b"%PDF-1.4 proposal"[..])),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn test_visitors_cannot_change_status() {
    let app = TestApp::new().await;
    let id = submit(&app, Some("buyer@example.com")).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/v1/proposals/{id}/"),
            Some(json!({ "details": "Bigger storefront", "status": "reviewed" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["details"], "Bigger storefront");
    assert_eq!(response.body["status"], "pending");

    let response = app.request("GET", "/api/v1/proposals/", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_send_proposal_delivers_document() {
    let app = TestApp::new().await;
    let token = app.admin_token("sales").await;
    let id = submit(&app, Some("buyer@example.com")).await;

    let response = send(&app, &id, &token).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(
        response.body,
        json!({ "status": "Proposal sent successfully and email delivered." })
    );

    let mails = app.mailer.sent().await;
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, vec!["buyer@example.com".to_string()]);
    assert_eq!(mails[0].attachments.len(), 1);
    assert_eq!(mails[0].attachments[0].filename, "offer.pdf");

    let proposal = fetch(&app, &id, &token).await;
    assert_eq!(proposal["status"], "sent");
    assert_eq!(proposal["admin_response"], "Our offer");
    assert!(proposal["proposal_document"].is_string());
}

#[tokio::test]
async fn test_send_proposal_requires_response_and_document() {
    let app = TestApp::new().await;
    let token = app.admin_token("sales").await;
    let id = submit(&app, Some("buyer@example.com")).await;

    let response = app
        .multipart(
            &format!("/api/v1/proposals/{id}/send_proposal/"),
            &[("admin_response", "Our offer")],
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "Admin response and document are required."
    );
    assert_eq!(app.mailer.count().await, 0);
}

#[tokio::test]
async fn test_failed_delivery_keeps_sent_status() {
    let app = TestApp::new().await;
    let token = app.admin_token("sales").await;
    let id = submit(&app, Some("buyer@example.com")).await;
    app.mailer.set_failing(true);

    let response = send(&app, &id, &token).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        response.body["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Failed to send email: "))
    );

    let proposal = fetch(&app, &id, &token).await;
    assert_eq!(proposal["status"], "sent");
}

#[tokio::test]
async fn test_mark_reviewed_is_idempotent() {
    let app = TestApp::new().await;
    let token = app.admin_token("sales").await;
    let id = submit(&app, None).await;
    let path = format!("/api/v1/proposals/{id}/mark_reviewed/");

    let response = app.request("POST", &path, None, Some(&token)).await;
    assert_eq!(response.body, json!({ "status": "Proposal marked as reviewed." }));
    let response = app.request("POST", &path, None, Some(&token)).await;
    assert_eq!(
        response.body,
        json!({ "status": "Proposal is already marked as reviewed." })
    );
    assert_eq!(fetch(&app, &id, &token).await["status"], "reviewed");
}
