//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use sitehub_api::{AppState, build_app};
use sitehub_auth::PasswordHasher;
use sitehub_cache::CacheManager;
use sitehub_cache::memory::MemoryCacheProvider;
use sitehub_core::config::AppConfig;
use sitehub_database::store::Stores;
use sitehub_entity::account::{NewAccount, Role};
use sitehub_mail::RecordingMailer;
use sitehub_storage::LocalStorage;

/// Password of every fixture account.
pub const PASSWORD: &str = "Str0ng@Pass";

/// Test application backed by in-memory stores.
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Stores for direct inspection
    pub stores: Stores,
    /// Captures outgoing mail
    pub mailer: RecordingMailer,
    _media: TempDir,
}

/// Status and decoded JSON body of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application with throttling disabled
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;
        Self::with_config(config).await
    }

    /// Create a test application from an explicit configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let media = TempDir::new().expect("Failed to create media dir");
        let storage = LocalStorage::new(media.path())
            .await
            .expect("Failed to init storage");
        let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
            &config.cache.memory,
        )));
        let stores = Stores::memory();
        let mailer = RecordingMailer::new();

        let state = AppState::new(
            config,
            stores.clone(),
            cache,
            Arc::new(storage),
            Arc::new(mailer.clone()),
        );

        Self {
            router: build_app(state),
            stores,
            mailer,
            _media: media,
        }
    }

    /// Insert an account with [`PASSWORD`]
    pub async fn create_account(&self, username: &str, role: Role) {
        let password_hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");
        self.stores
            .accounts
            .create(&NewAccount {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash,
                first_name: String::new(),
                last_name: String::new(),
                role,
            })
            .await
            .expect("Failed to create account");
    }

    /// Login and return the full login body
    pub async fn login_body(&self, username: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/v1/admin/login/",
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body
    }

    /// Login and return the access token
    pub async fn login(&self, username: &str) -> String {
        self.login_body(username).await["access"]
            .as_str()
            .expect("No access token in login response")
            .to_string()
    }

    /// Create an admin account and return its access token
    pub async fn admin_token(&self, username: &str) -> String {
        self.create_account(username, Role::Admin).await;
        self.login(username).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, "application/json", body, token, &[])
            .await
    }

    /// Make a multipart request with text fields and at most one file
    pub async fn multipart(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
        token: Option<&str>,
    ) -> TestResponse {
        const BOUNDARY: &str = "sitehub-test-boundary";
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((name, file_name, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
        self.send("POST", path, &content_type, body, token, &[])
            .await
    }

    /// Send a raw request with extra headers
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
