use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info};

use crate::server::types::{ApiError, ApiResponse, Meta};
use crate::six::ScheduleQuery;
use crate::types::AppState;

/// Query parameters for the schedule endpoint. Unknown parameters are ignored.
#[derive(Debug, Default)]
pub struct ScheduleParams {
    pub student_id: Option<String>,
    pub semester: Option<String>,
    pub fakultas: Option<String>,
    pub prodi: Option<String>,
    pub pekan: Option<String>,
    pub kegiatan: Option<String>,
    /// Only the exact value `true` bypasses the cache
    pub refresh: Option<String>,
}

impl ScheduleParams {
    /// Builds the parameters from raw query pairs. A repeated key keeps its
    /// first value.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "student_id" => &mut params.student_id,
                "semester" => &mut params.semester,
                "fakultas" => &mut params.fakultas,
                "prodi" => &mut params.prodi,
                "pekan" => &mut params.pekan,
                "kegiatan" => &mut params.kegiatan,
                "refresh" => &mut params.refresh,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    fn force_refresh(&self) -> bool {
        self.refresh.as_deref() == Some("true")
    }

    /// Turns the raw parameters into a lookup, if both required ones are set.
    fn into_query(self) -> Option<ScheduleQuery> {
        let student_id = self.student_id.filter(|v| !v.is_empty())?;
        let semester = self.semester.filter(|v| !v.is_empty())?;

        Some(ScheduleQuery {
            student_id,
            semester,
            fakultas: self.fakultas,
            prodi: self.prodi,
            pekan: self.pekan,
            kegiatan: self.kegiatan,
        })
    }
}

/// GET /api/schedule
///
/// Query parameters:
/// - `student_id`, `semester` (required)
/// - `fakultas`, `prodi`, `pekan`, `kegiatan` (optional): forwarded to SIX
/// - `refresh` (optional): Set to `true` to bypass cache
pub async fn get_schedule(
    State(s): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = ScheduleParams::from_pairs(pairs);
    let force_refresh = params.force_refresh();
    let Some(query) = params.into_query() else {
        return ApiError::from((
            StatusCode::BAD_REQUEST,
            "Missing student_id or semester query parameters",
        ))
        .into_response();
    };

    info!(
        student_id = %query.student_id,
        semester = %query.semester,
        refresh = force_refresh,
        "GET /api/schedule"
    );

    match s.six.get_schedule(&query, &headers, force_refresh).await {
        Ok(result) => ApiResponse::ok_with_meta(
            result.classes,
            Meta {
                fetched_at: result.fetched_at,
                cached: result.cached,
            },
        )
        .into_response(),
        Err(e) => {
            error!(
                student_id = %query.student_id,
                semester = %query.semester,
                error = %e,
                "Failed to fetch schedule"
            );
            ApiError::from(e).into_response()
        }
    }
}
