use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::server::types::ApiResponse;

/// GET /health
pub async fn get_health() -> Response {
    ApiResponse::ok(json!({ "status": "ok" })).into_response()
}
