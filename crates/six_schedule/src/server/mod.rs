use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware as mw, Router};

use crate::server::endpoints::{schedule, status, user};
use crate::server::types::ApiError;
use crate::types::AppState;

mod endpoints;
mod middleware;
pub mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Endpoints that forward the caller's SIX cookies
    let api_router = Router::new()
        .route("/user", get(user::get_user))
        .route("/schedule", get(schedule::get_schedule));

    Router::new()
        .route("/health", get(status::get_health))
        .nest("/api", api_router)
        .fallback(not_found)
        .layer(mw::from_fn(middleware::log_request))
        .with_state(app_state)
}

async fn not_found() -> Response {
    ApiError::from((StatusCode::NOT_FOUND, "Not found")).into_response()
}
