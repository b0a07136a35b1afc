//! Career applications over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

async fn open_career(app: &TestApp, token: &str, active: bool) -> String {
    let response = app
        .request(
            "POST",
            "/api/v1/careers/",
            Some(json!({
                "title": "Rust Engineer",
                "description": "Build things",
                "location": "Nairobi",
                "job_type": "full-time",
                "requirements": "Rust",
                "application_deadline": "2030-01-31",
                "active_listing": active,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_str().expect("career id").to_string()
}

async fn apply(app: &TestApp, career: &str, file_name: &str) -> crate::helpers::TestResponse {
    app.multipart(
        "/api/v1/apply/",
        &[
            ("applicant_name", "Grace Hopper"),
            ("applicant_email", "grace@example.com"),
            ("cover_letter", "I would like to join."),
            ("career", career),
        ],
        Some(("resume", file_name, &b"%PDF-1.4 resume"[..])),
        None,
    )
    .await
}

#[tokio::test]
async fn test_apply_and_shortlist() {
    let app = TestApp::new().await;
    let token = app.admin_token("recruiter").await;
    let career = open_career(&app, &token, true).await;

    let response = apply(&app, &career, "cv.pdf").await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"], "pending");
    assert_eq!(response.body["career"], career.as_str());
    let id = response.body["id"].as_str().expect("application id").to_string();

    let response = app.request("GET", "/api/v1/apply/", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/v1/apply/?status=pending", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().map(Vec::len), Some(1));

    let response = app
        .request("POST", &format!("/api/v1/apply/{id}/shortlist/"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Applicant shortlisted and interview email sent"
    );

    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["grace@example.com".to_string()]);

    let response = app
        .request("GET", &format!("/api/v1/apply/{id}/"), None, Some(&token))
        .await;
    assert_eq!(response.body["status"], "shortlisted");
}

#[tokio::test]
async fn test_closed_listing_rejects_applications() {
    let app = TestApp::new().await;
    let token = app.admin_token("recruiter").await;
    let career = open_career(&app, &token, false).await;

    let response = apply(&app, &career, "cv.pdf").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "This job listing is no longer active.");
}

#[tokio::test]
async fn test_resume_extension_is_checked() {
    let app = TestApp::new().await;
    let token = app.admin_token("recruiter").await;
    let career = open_career(&app, &token, true).await;

    let response = apply(&app, &career, "cv.exe").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["resume"].is_array());
}

#[tokio::test]
async fn test_unknown_status_filter() {
    let app = TestApp::new().await;
    let token = app.admin_token("recruiter").await;

    let response = app
        .request("GET", "/api/v1/apply/?status=archived", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_review_on_read_then_hire() {
    let app = TestApp::new().await;
    let token = app.admin_token("recruiter").await;
    let career = open_career(&app, &token, true).await;
    let response = apply(&app, &career, "CV.DOCX").await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_str().expect("application id").to_string();
    let path = format!("/api/v1/apply/{id}/");

    let response = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(response.body["status"], "reviewed");
    let response = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(response.body["status"], "reviewed");
    assert_eq!(app.mailer.count().await, 0);

    let response = app
        .request("PATCH", &path, Some(json!({ "status": "hired" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "hired");

    // Same status again: no second notice.
    app.request("PATCH", &path, Some(json!({ "status": "hired" })), Some(&token))
        .await;

    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Welcome to the Team!");
}
