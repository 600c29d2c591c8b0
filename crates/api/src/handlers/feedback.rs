//! Handler for the public `/feedback` intake.
//!
//! Creation only: feedback is never listed, edited, or deleted through the
//! public API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use complia_core::error::CoreError;
use complia_core::feedback::{self, NoticeRef};
use complia_db::models::notice_feedback::CreateNoticeFeedback;
use complia_db::repositories::NoticeFeedbackRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::representation::{feedback_representation, FeedbackRepresentation};
use crate::state::AppState;

/// Request body for `POST /api/feedback/`.
///
/// Every field is optional at the wire level so missing fields produce a
/// field-specific validation message instead of a generic decode error.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedback {
    pub notice: Option<NoticeRef>,
    pub is_helpful: Option<bool>,
    pub comments: Option<String>,
}

/// POST /api/feedback/
///
/// Record a helpfulness rating for a notice type referenced by id or code.
/// A numeric string (`"7"`) that is not a code is read as an id. The notice
/// may be inactive; it must exist.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitFeedback>, JsonRejection>,
) -> AppResult<(StatusCode, Json<FeedbackRepresentation>)> {
    let Json(input) = payload?;

    let notice = input
        .notice
        .ok_or_else(|| CoreError::Validation("Field 'notice' is required".into()))?;
    notice.validate()?;
    let is_helpful = feedback::require_is_helpful(input.is_helpful)?;
    let comments = feedback::normalize_comments(input.comments.as_deref())?;

    let create = CreateNoticeFeedback {
        notice,
        is_helpful,
        comments,
    };
    let created = NoticeFeedbackRepo::create(&state.pool, &create)
        .await?
        .ok_or_else(|| {
            CoreError::Validation(format!("Notice '{}' does not exist", create.notice))
        })?;

    tracing::info!(
        id = created.id,
        notice_type_id = created.notice_type_id,
        is_helpful = created.is_helpful,
        "Feedback recorded"
    );
    Ok((StatusCode::CREATED, Json(feedback_representation(&created))))
}
