use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::server::types::{ApiError, ApiResponse};
use crate::types::AppState;

/// GET /api/user
///
/// Returns the student ID and current semester for the forwarded cookies.
pub async fn get_user(State(s): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    info!("GET /api/user");

    match s.six.resolve_identity(&headers).await {
        Ok(identity) => ApiResponse::ok(identity).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to resolve user identity");
            ApiError::from(e).into_response()
        }
    }
}
