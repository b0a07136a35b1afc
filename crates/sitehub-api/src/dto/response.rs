//! Response DTOs.

use axum::http::Uri;
use serde::Serialize;

use sitehub_core::types::PageResponse;
use sitehub_service::content::Department;

/// `{"message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"status": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse<S> {
    pub status: S,
}

/// `{"detail": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// `{"error": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub error: String,
}

/// Outcome of an unsubscribe request.
#[derive(Debug, Clone, Serialize)]
pub struct UnsubscribeResponse {
    pub success: bool,
    pub message: String,
}

/// Result of a newsletter broadcast.
#[derive(Debug, Clone, Serialize)]
pub struct NewsletterSent {
    pub message: String,
    pub recipients: usize,
}

/// `{"likes": n}`
#[derive(Debug, Clone, Serialize)]
pub struct LikesResponse {
    pub likes: u32,
}

/// Grouped team roster.
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub team: Vec<Department>,
}

/// Health check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Page envelope with links to the neighbouring pages.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Builds the envelope. Links keep the request's other query
    /// parameters (filters, search) and the page size, sorted by name.
    pub fn from_page(page: PageResponse<T>, uri: &Uri) -> Self {
        let kept: Vec<&str> = uri
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| !matches!(query_key(pair), "page" | "page_size"))
            .collect();
        let page_size = page.page_size;
        let link = |n: u64| {
            let mut pairs: Vec<String> = kept.iter().map(|p| p.to_string()).collect();
            pairs.push(format!("page={n}"));
            pairs.push(format!("page_size={page_size}"));
            pairs.sort_by(|a, b| query_key(a).cmp(query_key(b)));
            format!("{}?{}", uri.path(), pairs.join("&"))
        };
        Self {
            count: page.total_items,
            next: page.has_next.then(|| link(page.page + 1)),
            previous: page.has_previous.then(|| link(page.page - 1)),
            results: page.items,
        }
    }
}

fn query_key(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(key, _)| key)
}
