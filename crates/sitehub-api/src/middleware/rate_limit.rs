//! Token bucket rate limiter middleware.
//!
//! Anonymous callers are keyed by client address, authenticated callers
//! by account, each with their own per-minute allowance.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use moka::sync::Cache;
use tracing::warn;

use sitehub_core::config::RateLimitConfig;
use sitehub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::auth::bearer_token;
use crate::state::AppState;

/// A bucket refills completely within this window, so an idle bucket is
/// indistinguishable from a fresh one after it.
const REFILL_WINDOW: Duration = Duration::from_secs(60);

/// In-memory token bucket rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Caller key → bucket state. Idle buckets are evicted.
    buckets: Cache<String, TokenBucket>,
    enabled: bool,
    trust_forwarded_for: bool,
    anon_per_minute: u32,
    user_per_minute: u32,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
    /// Whether the last take succeeded.
    allowed: bool,
}

impl TokenBucket {
    fn take(previous: Option<&TokenBucket>, capacity: f64, now: Instant) -> Self {
        let tokens = match previous {
            Some(bucket) => {
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                (bucket.tokens + elapsed * capacity / REFILL_WINDOW.as_secs_f64()).min(capacity)
            }
            None => capacity,
        };
        if tokens >= 1.0 {
            Self { tokens: tokens - 1.0, last_refill: now, allowed: true }
        } else {
            Self { tokens, last_refill: now, allowed: false }
        }
    }
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let buckets = Cache::builder()
            .max_capacity(config.max_tracked_clients.max(1))
            .time_to_idle(REFILL_WINDOW)
            .build();
        Self {
            buckets,
            enabled: config.enabled,
            trust_forwarded_for: config.trust_forwarded_for,
            anon_per_minute: config.anon_per_minute,
            user_per_minute: config.user_per_minute,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Attempts to consume a token for `key`, whose bucket holds `capacity`
    /// tokens and refills completely over one minute.
    pub fn check(&self, key: &str, capacity: u32) -> bool {
        let capacity = f64::from(capacity.max(1));
        let now = Instant::now();
        self.buckets
            .entry(key.to_string())
            .and_upsert_with(|entry| {
                TokenBucket::take(entry.as_ref().map(|e| e.value()), capacity, now)
            })
            .into_value()
            .allowed
    }
}

/// Throttles requests per caller.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limiter = &state.rate_limiter;
    if !limiter.enabled() {
        return next.run(request).await;
    }

    let account = match bearer_token(request.headers()) {
        Some(token) => state.jwt_decoder.decode_access_token(&token).await.ok(),
        None => None,
    };
    let (key, capacity) = match account {
        Some(claims) => (format!("user:{}", claims.sub), limiter.user_per_minute),
        None => (
            format!("anon:{}", client_address(&request, limiter.trust_forwarded_for)),
            limiter.anon_per_minute,
        ),
    };

    if limiter.check(&key, capacity) {
        next.run(request).await
    } else {
        warn!(caller = %key, path = %request.uri().path(), "Request throttled");
        ApiError(AppError::rate_limited("Request was throttled.")).into_response()
    }
}

fn client_address(request: &Request, trust_forwarded_for: bool) -> String {
    trust_forwarded_for
        .then(|| forwarded_for(request.headers()))
        .flatten()
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            enabled: true,
            anon_per_minute: 2,
            user_per_minute: 3,
            ..RateLimitConfig::default()
        })
    }

    fn forwarded_request(peer: &str) -> Request {
        let mut request = Request::builder()
            .uri("/health/")
            .header("x-forwarded-for", "203.0.113.7")
            .body(axum::body::Body::empty())
            .unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
    }

    #[test]
    fn test_bucket_depletes() {
        let limiter = limiter();
        assert!(limiter.check("anon:10.0.0.1", 2));
        assert!(limiter.check("anon:10.0.0.1", 2));
        assert!(!limiter.check("anon:10.0.0.1", 2));
    }

    #[test]
    fn test_callers_have_separate_buckets() {
        let limiter = limiter();
        assert!(limiter.check("anon:10.0.0.1", 1));
        assert!(!limiter.check("anon:10.0.0.1", 1));
        assert!(limiter.check("anon:10.0.0.2", 1));
    }

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(forwarded_for(&headers).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_forwarded_for_ignored_unless_trusted() {
        let request = forwarded_request("198.51.100.4:5000");
        assert_eq!(client_address(&request, false), "198.51.100.4");
        assert_eq!(client_address(&request, true), "203.0.113.7");
    }

    #[test]
    fn test_bucket_refills_over_window() {
        let now = Instant::now();
        let spent = TokenBucket { tokens: 0.0, last_refill: now, allowed: false };
        assert!(!TokenBucket::take(Some(&spent), 2.0, now).allowed);
        let later = now + Duration::from_secs(30);
        let refilled = TokenBucket::take(Some(&spent), 2.0, later);
        assert!(refilled.allowed);
        assert!(refilled.tokens.abs() < f64::EPSILON);
    }
}
