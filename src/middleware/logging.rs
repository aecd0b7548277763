//! Request logging middleware
//!
//! Runs inside `SetRequestIdLayer`, so every request already carries an
//! `x-request-id` header by the time it is logged. Health probes log at debug.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info, info_span, warn, Instrument};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);
    let response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    span.in_scope(|| {
        if status.is_server_error() {
            warn!(status = status.as_u16(), duration_ms = %duration_ms, "Request failed");
        } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
            warn!(status = status.as_u16(), duration_ms = %duration_ms, "Request rejected");
        } else if path.starts_with("/health") {
            debug!(status = status.as_u16(), duration_ms = %duration_ms, "Health probe");
        } else {
            info!(status = status.as_u16(), duration_ms = %duration_ms, "Request completed");
        }
    });

    response
}
