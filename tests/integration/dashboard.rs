//! Dashboard statistics over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_dashboard_counts_and_activity() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/v1/dashboard/stats/", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token("editor").await;
    app.request(
        "POST",
        "/api/v1/subscribe/",
        Some(json!({ "email": "reader@example.com" })),
        None,
    )
    .await;
    app.request(
        "POST",
        "/api/v1/reviews/",
        Some(json!({ "name": "Client", "rating": 5, "comment": "Great" })),
        None,
    )
    .await;

    let response = app
        .request("GET", "/api/v1/dashboard/stats/", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_subscribers"], 1);
    assert_eq!(response.body["total_admins"], 1);
    assert_eq!(response.body["total_reviews"], 1);
    assert_eq!(response.body["total_blogs"], 0);

    let messages: Vec<&str> = response.body["recent_activities"]
        .as_array()
        .expect("activity feed")
        .iter()
        .filter_map(|a| a["message"].as_str())
        .collect();
    assert_eq!(messages, vec!["New review added", "1 new subscribers"]);
}
