//! Notice feedback model: a "was this helpful?" rating for a notice type.

use complia_core::feedback::NoticeRef;
use complia_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notice_feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoticeFeedback {
    pub id: DbId,
    pub notice_type_id: DbId,
    pub is_helpful: bool,
    pub comments: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording feedback. Built by the intake handler after validation.
#[derive(Debug, Clone)]
pub struct CreateNoticeFeedback {
    pub notice: NoticeRef,
    pub is_helpful: bool,
    pub comments: Option<String>,
}

/// Aggregated feedback for one notice type.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackSummary {
    pub notice_type_id: DbId,
    pub total: i64,
    pub helpful: i64,
    pub not_helpful: i64,
    /// Most recent feedback rows carrying comments, newest first.
    pub recent_comments: Vec<NoticeFeedback>,
}
