//! Request throttling over HTTP.

use axum::http::StatusCode;

use sitehub_core::config::AppConfig;

use crate::helpers::TestApp;

async fn throttled_app() -> TestApp {
    let mut config = AppConfig::default();
    config.rate_limit.enabled = true;
    config.rate_limit.anon_per_minute = 2;
    config.rate_limit.trust_forwarded_for = true;
    TestApp::with_config(config).await
}

async fn health_from(app: &TestApp, address: &str) -> StatusCode {
    app.send(
        "GET",
        "/api/v1/health/",
        "application/json",
        Vec::new(),
        None,
        &[("x-forwarded-for", address)],
    )
    .await
    .status
}

#[tokio::test]
async fn test_anonymous_callers_are_throttled_per_address() {
    let app = throttled_app().await;

    assert_eq!(health_from(&app, "203.0.113.7").await, StatusCode::OK);
    assert_eq!(health_from(&app, "203.0.113.7").await, StatusCode::OK);
    assert_eq!(
        health_from(&app, "203.0.113.7").await,
        StatusCode::TOO_MANY_REQUESTS
    );

    assert_eq!(health_from(&app, "198.51.100.1").await, StatusCode::OK);
}

#[tokio::test]
async fn test_rotating_forwarded_for_is_ignored_by_default() {
    let mut config = AppConfig::default();
    config.rate_limit.enabled = true;
    config.rate_limit.anon_per_minute = 2;
    let app = TestApp::with_config(config).await;

    assert_eq!(health_from(&app, "203.0.113.1").await, StatusCode::OK);
    assert_eq!(health_from(&app, "203.0.113.2").await, StatusCode::OK);
    assert_eq!(
        health_from(&app, "203.0.113.3").await,
        StatusCode::TOO_MANY_REQUESTS
    );
}
