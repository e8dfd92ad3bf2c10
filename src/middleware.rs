//! HTTP side of rate limiting: turns a [`RateLimitResult`] into headers, or
//! into a `429 Too Many Requests` when the client is over its limit.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;
use crate::fingerprint::fingerprint;
use crate::metrics::{RATE_LIMITED, REQUEST_TOTAL};
use crate::models::RateLimitedResponse;
use crate::rate_limit::{RateLimitResult, client_key};
use crate::state::AppState;

pub const X_RATELIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const X_RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
/// Epoch seconds.
pub const X_RATELIMIT_RESET: &str = "x-ratelimit-reset";

fn set_rate_limit_headers(headers: &mut HeaderMap, limit: u32, result: &RateLimitResult) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(result.remaining));
    headers.insert(
        X_RATELIMIT_RESET,
        HeaderValue::from(result.reset_time.div_ceil(1000)),
    );
}

/// Rate limit by client address, see [`client_key`].
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    REQUEST_TOTAL.inc();

    let limiter = &state.rate_limiter;
    let key = client_key(request.headers());
    let result = limiter.check(&key);
    let limit = limiter.config().max_attempts;

    if !result.allowed {
        RATE_LIMITED.inc();
        warn!(
            client = %fingerprint(&key),
            reset_time = result.reset_time,
            path = %request.uri().path(),
            "Rate limit exceeded"
        );

        let retry_after = result.retry_after_secs(limiter.now_ms());
        let body = RateLimitedResponse {
            error: "rate_limited".to_string(),
            remaining: result.remaining,
            reset_time: result.reset_time,
        };
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        let headers = response.headers_mut();
        set_rate_limit_headers(headers, limit, &result);
        headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        return response;
    }

    let mut response = next.run(request).await;
    set_rate_limit_headers(response.headers_mut(), limit, &result);
    response
}
