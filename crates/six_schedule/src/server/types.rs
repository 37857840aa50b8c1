//! JSON envelope shared by every endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::six::SixError;

/// `{success, data?, meta?, error?}`; exactly one of `data`/`error` is set.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Freshness information for cached data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub fetched_at: DateTime<Utc>,
    pub cached: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: None,
            error: None,
        }
    }

    pub fn ok_with_meta(data: T, meta: Meta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::ok(data)
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// An error response: a status code plus a human-readable message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl<S: Into<String>> From<(StatusCode, S)> for ApiError {
    fn from((status, message): (StatusCode, S)) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<SixError> for ApiError {
    fn from(err: SixError) -> Self {
        let status = if err.is_upstream_failure() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::NOT_FOUND
        };
        Self::from((status, err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            meta: None,
            error: Some(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}
