use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Log every request to the receiver with its client address and latency.
///
/// Rate-limited and failed requests are logged at `warn`, everything else
/// at `debug`.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match status {
        StatusCode::TOO_MANY_REQUESTS => tracing::warn!(
            client_ip = %addr.ip(),
            %method,
            %uri,
            elapsed_ms,
            "Rate limited check-in client"
        ),
        s if s.is_client_error() || s.is_server_error() => tracing::warn!(
            client_ip = %addr.ip(),
            %method,
            %uri,
            status = %s,
            elapsed_ms,
            "Request failed"
        ),
        s => tracing::debug!(
            client_ip = %addr.ip(),
            %method,
            %uri,
            status = %s,
            elapsed_ms,
            "Request completed"
        ),
    }

    response
}
