//! Handlers for the public `/notices` lookup resource.
//!
//! Read-only. Only active notice types are ever returned.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use complia_core::error::CoreError;
use complia_core::notice::{self, SearchQuery};
use complia_db::repositories::NoticeTypeRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::representation::{notice_representation, NoticeRepresentation};
use crate::state::AppState;

/// Query parameters for the notice listing.
#[derive(Debug, Deserialize)]
pub struct NoticeListParams {
    /// Free-text search. Absent or blank lists every active notice.
    pub search: Option<String>,
}

/// GET /api/notices/?search=
///
/// List active notice types ordered by code, optionally filtered by a
/// case-insensitive substring search over code, title, keywords, and summary.
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<NoticeListParams>, QueryRejection>,
) -> AppResult<Json<Vec<NoticeRepresentation>>> {
    let Query(params) = params?;
    let notices = match params.search.as_deref() {
        Some(raw) => NoticeTypeRepo::search_active(&state.pool, &SearchQuery::parse(raw)).await?,
        None => NoticeTypeRepo::list_active(&state.pool).await?,
    };
    tracing::debug!(
        search = params.search.as_deref().unwrap_or(""),
        count = notices.len(),
        "Listed notices"
    );
    Ok(Json(notices.iter().map(notice_representation).collect()))
}

/// GET /api/notices/{code}/
///
/// Exact code lookup. Inactive, unknown, and unstorable codes are all 404.
pub async fn get_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<NoticeRepresentation>> {
    let not_found = || CoreError::not_found("NoticeType", code.escape_debug());
    if notice::validate_storable("code", &code).is_err() {
        return Err(not_found().into());
    }
    let notice = NoticeTypeRepo::find_active_by_code(&state.pool, &code)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(notice_representation(&notice)))
}
