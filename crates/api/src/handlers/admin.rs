//! Handlers for the `/admin/notices` catalog administration resource.
//!
//! Every handler requires [`RequireAdmin`]. Unlike the public lookup, these
//! endpoints see inactive notice types and expose keyword ids.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use complia_core::error::CoreError;
use complia_core::notice;
use complia_core::types::DbId;
use complia_db::models::notice_type::{
    CreateNoticeType, NoticeType, NoticeTypeFilter, NoticeTypeWithTriggers, UpdateNoticeType,
};
use complia_db::models::trigger_keyword::CreateTriggerKeyword;
use complia_db::repositories::{NoticeFeedbackRepo, NoticeTypeRepo, TriggerKeywordRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of recent comments included in a feedback summary.
const FEEDBACK_RECENT_COMMENTS: i64 = 20;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a notice type exists, returning the row.
async fn ensure_notice_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<NoticeType> {
    NoticeTypeRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("NoticeType", id)))
}

/// Load a notice type with keywords, treating a vanished row as not found.
async fn load_with_triggers(pool: &sqlx::PgPool, id: DbId) -> AppResult<NoticeTypeWithTriggers> {
    NoticeTypeRepo::find_by_id_with_triggers(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("NoticeType", id)))
}

fn validate_optional_fields(
    source_section: Option<&str>,
    verified_by: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(source_section) = source_section {
        notice::validate_max_length(
            "source_section",
            source_section,
            notice::MAX_SOURCE_SECTION_LENGTH,
        )?;
    }
    if let Some(verified_by) = verified_by {
        notice::validate_max_length("verified_by", verified_by, notice::MAX_VERIFIED_BY_LENGTH)?;
    }
    Ok(())
}

/// Reject NUL in long-form text fields that carry no other rule.
fn validate_free_text(fields: &[(&str, Option<&str>)]) -> Result<(), CoreError> {
    for (field, value) in fields {
        if let Some(value) = value {
            notice::validate_storable(field, value)?;
        }
    }
    Ok(())
}

/// Map a duplicate-code violation to a conflict naming the code.
fn code_conflict(err: sqlx::Error, code: Option<&str>) -> AppError {
    match code {
        Some(code) if complia_db::is_unique_violation(&err) => AppError::Core(
            CoreError::Conflict(format!("Notice code '{code}' already exists")),
        ),
        _ => AppError::Database(err),
    }
}

/// Trim each keyword and validate it.
fn normalize_keywords(keywords: &[String]) -> Result<Vec<String>, CoreError> {
    keywords
        .iter()
        .map(|k| {
            let k = k.trim();
            notice::validate_keyword(k)?;
            Ok(k.to_string())
        })
        .collect()
}

fn validate_create(input: &mut CreateNoticeType) -> Result<(), CoreError> {
    notice::validate_code(&input.code)?;
    notice::validate_title(&input.title)?;
    if let Some(severity) = &input.severity {
        notice::validate_severity(severity)?;
    }
    validate_optional_fields(input.source_section.as_deref(), input.verified_by.as_deref())?;
    validate_free_text(&[
        ("summary", input.summary.as_deref()),
        ("detailed_explanation", Some(&input.detailed_explanation)),
        ("why_received", input.why_received.as_deref()),
        ("common_mistakes", input.common_mistakes.as_deref()),
        ("consequences_of_ignoring", Some(&input.consequences_of_ignoring)),
        ("next_steps", Some(&input.next_steps)),
    ])?;
    input.triggers = normalize_keywords(&input.triggers)?;
    Ok(())
}

fn validate_update(input: &mut UpdateNoticeType) -> Result<(), CoreError> {
    if let Some(code) = &input.code {
        notice::validate_code(code)?;
    }
    if let Some(title) = &input.title {
        notice::validate_title(title)?;
    }
    if let Some(severity) = &input.severity {
        notice::validate_severity(severity)?;
    }
    validate_optional_fields(input.source_section.as_deref(), input.verified_by.as_deref())?;
    validate_free_text(&[
        ("summary", input.summary.as_deref()),
        ("detailed_explanation", input.detailed_explanation.as_deref()),
        ("why_received", input.why_received.as_deref()),
        ("common_mistakes", input.common_mistakes.as_deref()),
        ("consequences_of_ignoring", input.consequences_of_ignoring.as_deref()),
        ("next_steps", input.next_steps.as_deref()),
    ])?;
    if let Some(triggers) = &input.triggers {
        input.triggers = Some(normalize_keywords(triggers)?);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/notices?severity=&is_active=&verified_by=
///
/// List all notice types (active and inactive) with their keywords.
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    params: Result<Query<NoticeTypeFilter>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filter) = params?;
    if let Some(severity) = &filter.severity {
        notice::validate_severity(severity)?;
    }
    if let Some(verified_by) = &filter.verified_by {
        notice::validate_storable("verified_by", verified_by)?;
    }
    let notices = NoticeTypeRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = notices.len(), "Listed notice types (admin)");
    Ok(Json(DataResponse { data: notices }))
}

/// POST /api/admin/notices
///
/// Create a notice type with its keywords. A duplicate code is a 409.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<CreateNoticeType>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(mut input) = payload?;
    validate_create(&mut input)?;

    let created = NoticeTypeRepo::create(&state.pool, &input)
        .await
        .map_err(|e| code_conflict(e, Some(&input.code)))?;
    tracing::info!(id = created.id, code = %created.code, "Notice type created");

    let with_triggers = load_with_triggers(&state.pool, created.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: with_triggers })))
}

/// GET /api/admin/notices/{id}
pub async fn get_by_id(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let notice = load_with_triggers(&state.pool, id).await?;
    Ok(Json(DataResponse { data: notice }))
}

/// PUT /api/admin/notices/{id}
///
/// Update a notice type. If `triggers` is present, replaces all keywords.
/// An empty `verified_by` clears the verification; setting it on an
/// unverified notice stamps `verified_at`.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateNoticeType>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(mut input) = payload?;
    validate_update(&mut input)?;

    let updated = NoticeTypeRepo::update(&state.pool, id, &input)
        .await
        .map_err(|e| code_conflict(e, input.code.as_deref()))?
        .ok_or_else(|| AppError::Core(CoreError::not_found("NoticeType", id)))?;
    tracing::info!(id, code = %updated.code, is_active = updated.is_active, "Notice type updated");

    let with_triggers = load_with_triggers(&state.pool, id).await?;
    Ok(Json(DataResponse { data: with_triggers }))
}

/// DELETE /api/admin/notices/{id}
///
/// Hard delete. Keywords and feedback are removed with the notice type.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    if NoticeTypeRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Notice type deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("NoticeType", id)))
    }
}

/// POST /api/admin/notices/{id}/keywords
///
/// Append a trigger keyword.
pub async fn add_keyword(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<CreateTriggerKeyword>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let keyword = input.keyword.trim();
    notice::validate_keyword(keyword)?;
    ensure_notice_exists(&state.pool, id).await?;

    let created = TriggerKeywordRepo::add(&state.pool, id, keyword).await?;
    tracing::info!(notice_type_id = id, keyword_id = created.id, "Trigger keyword added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// DELETE /api/admin/notices/{id}/keywords/{keyword_id}
pub async fn remove_keyword(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<(DbId, DbId)>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path((id, keyword_id)) = path?;
    if TriggerKeywordRepo::remove(&state.pool, id, keyword_id).await? {
        tracing::info!(notice_type_id = id, keyword_id, "Trigger keyword removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found(
            "TriggerKeyword",
            keyword_id,
        )))
    }
}

/// GET /api/admin/notices/{id}/feedback
///
/// Helpful / not-helpful counts and the most recent comments.
pub async fn feedback_summary(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path?;
    ensure_notice_exists(&state.pool, id).await?;
    let summary =
        NoticeFeedbackRepo::summary_for_notice(&state.pool, id, FEEDBACK_RECENT_COMMENTS).await?;
    Ok(Json(DataResponse { data: summary }))
}
