//! Request logging middleware.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;
use std::time::Instant;
use tracing::info;

/// Logs method, URI, status and duration of every request.
pub async fn log_request(req: Request, next: Next) -> Response {
    let request_id = generate_request_id();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Handled request"
    );

    response
}

/// Generates a short ID for correlating log lines of one request.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
