//! Logging middleware for request/response tracing.
//!
//! Emits one event per completed request with method, path, status,
//! latency, and the correlation id set by the request ID middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use super::RequestId;

pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let latency = start.elapsed();

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = latency.as_millis() as u64,
        request_id = %request_id,
        "request handled"
    );

    response
}
