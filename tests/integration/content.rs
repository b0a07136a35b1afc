//! Content collections, per-kind actions and the team roster over HTTP.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn blog(title: &str) -> Value {
    json!({
        "title": title,
        "excerpt": "First post",
        "image": "https://cdn.example.com/b.png",
        "date": "2026-01-05",
        "author_name": "Jane",
        "author_avatar": "https://cdn.example.com/a.png",
        "author_role": "Editor",
    })
}

fn career(title: &str, active: bool) -> Value {
    json!({
        "title": title,
        "description": "Build things",
        "location": "Nairobi",
        "job_type": "full-time",
        "requirements": "Rust",
        "application_deadline": "2030-01-31",
        "active_listing": active,
    })
}

fn case_study(title: &str) -> Value {
    json!({
        "title": title,
        "industry": "tech",
        "description": "A migration",
        "challenges": "Legacy",
        "solutions": "Rewrite",
        "results": "Faster",
        "image": "https://cdn.example.com/case.png",
    })
}

fn member(name: &str, department: Option<&str>) -> Value {
    json!({
        "name": name,
        "role": "Software Engineer",
        "department": department,
        "image": "https://cdn.example.com/m.png",
    })
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("record id").to_string()
}

#[tokio::test]
async fn test_editorial_writes_need_staff() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/v1/blogs/", Some(blog("Hello")), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token("editor").await;
    let response = app
        .request("POST", "/api/v1/blogs/", Some(blog("Hello")), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["likes"], 0);
    let id = id_of(&response.body);

    let response = app.request("GET", "/api/v1/blogs/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().map(Vec::len), Some(1));

    let response = app
        .request("GET", &format!("/api/v1/blogs/{id}/"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Hello");

    let response = app
        .request(
            "PATCH",
            &format!("/api/v1/blogs/{id}/"),
            Some(json!({ "title": "Renamed" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "PATCH",
            &format!("/api/v1/blogs/{id}/"),
            Some(json!({ "title": "Renamed" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Renamed");
    assert_eq!(response.body["author_name"], "Jane");
}

#[tokio::test]
async fn test_blog_likes_are_public() {
    let app = TestApp::new().await;
    let token = app.admin_token("editor").await;
    let response = app
        .request("POST", "/api/v1/blogs/", Some(blog("Hello")), Some(&token))
        .await;
    let id = id_of(&response.body);

    let path = format!("/api/v1/blogs/{id}/like/");
    let response = app.request("POST", &path, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "likes": 1 }));
    let response = app.request("POST", &path, None, None).await;
    assert_eq!(response.body, json!({ "likes": 2 }));
}

#[tokio::test]
async fn test_leads_are_private_after_submission() {
    let app = TestApp::new().await;
    let message = json!({
        "full_name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "0700000000",
        "message": "Hello",
    });

    let response = app.request("POST", "/api/v1/messages/", Some(message), None).await;
    assert_eq!(response.status, StatusCode::CREATED);
    let path = format!("/api/v1/messages/{}/", response.body["id"].as_str().unwrap());

    let response = app.request("GET", "/api/v1/messages/", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token("editor").await;
    let response = app.request("GET", "/api/v1/messages/", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body[0]["full_name"], "Jane Doe");

    let response = app
        .request("PATCH", &path, Some(json!({ "message": "Edited" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_invalid_submission_reports_fields() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/v1/messages/",
            Some(json!({
                "full_name": "Jane",
                "email": "not-an-email",
                "phone": "1",
                "message": "x",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["email"].is_array());
}

#[tokio::test]
async fn test_review_toggle_and_delete() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/v1/reviews/",
            Some(json!({ "name": "Client", "rating": 5, "comment": "Great" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["status"], "ON");
    let id = id_of(&response.body);

    let toggle = format!("/api/v1/reviews/{id}/toggle/");
    let response = app.request("PUT", &toggle, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token("editor").await;
    let response = app.request("PUT", &toggle, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "OFF" }));

    let response = app
        .request("DELETE", &format!("/api/v1/reviews/{id}/delete_review/"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/v1/reviews/{id}/"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_visitors_only_see_open_careers() {
    let app = TestApp::new().await;
    let token = app.admin_token("editor").await;
    for (title, active) in [("Open", true), ("Closed", false)] {
        let response = app
            .request("POST", "/api/v1/careers/", Some(career(title, active)), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = app.request("GET", "/api/v1/careers/", None, None).await;
    let titles: Vec<&str> = response
        .body
        .as_array()
        .expect("career list")
        .iter()
        .filter_map(|c| c["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Open"]);

    let response = app.request("GET", "/api/v1/careers/", None, Some(&token)).await;
    assert_eq!(response.body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_case_studies_are_paged() {
    let app = TestApp::new().await;
    let token = app.admin_token("editor").await;
    for title in ["One", "Two", "Three"] {
        app.request("POST", "/api/v1/case-studies/", Some(case_study(title)), Some(&token))
            .await;
    }

    let response = app
        .request("GET", "/api/v1/case-studies/?page_size=2", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 3);
    assert_eq!(response.body["results"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        response.body["next"],
        "/api/v1/case-studies/?page=2&page_size=2"
    );
    assert!(response.body["previous"].is_null());

    let response = app
        .request("GET", "/api/v1/case-studies/?page=2&page_size=2", None, None)
        .await;
    assert_eq!(response.body["results"].as_array().map(Vec::len), Some(1));
    assert!(response.body["next"].is_null());

    let response = app
        .request("GET", "/api/v1/case-studies/?industry=tech&page_size=1", None, None)
        .await;
    assert_eq!(
        response.body["next"],
        "/api/v1/case-studies/?industry=tech&page=2&page_size=1"
    );

    let response = app
        .request("GET", "/api/v1/case-studies/?page=18446744073709551615", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Invalid page.");
}

#[tokio::test]
async fn test_team_grouped_by_department() {
    let app = TestApp::new().await;
    let token = app.admin_token("editor").await;
    for (name, department) in [
        ("Ann", Some("Marketing")),
        ("Bob", None),
        ("Cid", Some("Engineering")),
    ] {
        let response = app
            .request("POST", "/api/v1/team/", Some(member(name, department)), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        assert_eq!(response.body["country"], "Kenya");
    }

    let response = app.request("GET", "/api/v1/team/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let departments: Vec<&str> = response.body["team"]
        .as_array()
        .expect("team groups")
        .iter()
        .filter_map(|g| g["department"].as_str())
        .collect();
    assert_eq!(departments, vec!["Engineering", "Marketing", "Unassigned"]);
}

#[tokio::test]
async fn test_missing_team_member() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "GET",
            "/api/v1/team/0190f3a2-0000-7000-8000-000000000000/",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "detail": "Team member not found." }));
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/v1/news/42/", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
