// Process-wide request rate limiting

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Fixed-window rate limiter shared by every request in the process.
///
/// Admission is an immediate accept/reject decision backed by atomics; callers
/// are never queued. The counter is not per-client: once the window budget is
/// spent, all traffic is rejected until the window rolls over.
pub struct RateLimiter {
    max_requests: u64,
    window: Duration,
    epoch: Instant,
    window_start_ms: AtomicU64,
    count: AtomicU64,
}

impl RateLimiter {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            epoch: Instant::now(),
            window_start_ms: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Admit or reject one request.
    pub fn allow(&self) -> bool {
        let now_ms = self.epoch.elapsed().as_millis() as u64;
        let window_ms = self.window.as_millis() as u64;

        loop {
            let start = self.window_start_ms.load(Ordering::Acquire);
            if now_ms.saturating_sub(start) >= window_ms {
                // Window elapsed; exactly one caller wins the CAS and resets
                // the counter, everyone else re-reads.
                if self
                    .window_start_ms
                    .compare_exchange(start, now_ms, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
                {
                    self.count.store(0, Ordering::Release);
                }
                continue;
            }
            return self.count.fetch_add(1, Ordering::AcqRel) < self.max_requests;
        }
    }
}

/// Axum middleware applying the process-wide limiter to every request.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.allow() {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Rate limit exceeded" })),
        )
            .into_response()
    }
}
