//! Repository for the `notice_feedback` table.

use complia_core::feedback::NoticeRef;
use complia_core::types::DbId;
use sqlx::PgPool;

use crate::models::notice_feedback::{CreateNoticeFeedback, FeedbackSummary, NoticeFeedback};

/// Column list for the `notice_feedback` table.
const COLUMNS: &str = "id, notice_type_id, is_helpful, comments, created_at, updated_at";

/// Provides feedback persistence and per-notice aggregation.
pub struct NoticeFeedbackRepo;

impl NoticeFeedbackRepo {
    /// Record feedback against the referenced notice type, active or not.
    ///
    /// The reference is resolved inside the `INSERT`, so a missing notice
    /// yields `None` and writes nothing. A string reference that matches no
    /// code but parses as an integer (`"7"`) is retried as an id.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNoticeFeedback,
    ) -> Result<Option<NoticeFeedback>, sqlx::Error> {
        let created = Self::insert_for(pool, &input.notice, input).await?;
        match (created, input.notice.fallback_id()) {
            (None, Some(id)) => Self::insert_for(pool, &NoticeRef::Id(id), input).await,
            (created, _) => Ok(created),
        }
    }

    async fn insert_for(
        pool: &PgPool,
        notice: &NoticeRef,
        input: &CreateNoticeFeedback,
    ) -> Result<Option<NoticeFeedback>, sqlx::Error> {
        let lookup = match notice {
            NoticeRef::Id(_) => "id = $1",
            NoticeRef::Code(_) => "code = $1",
        };
        let query = format!(
            "INSERT INTO notice_feedback (notice_type_id, is_helpful, comments) \
             SELECT id, $2, $3 FROM notice_types WHERE {lookup} \
             RETURNING {COLUMNS}"
        );

        let insert = sqlx::query_as::<_, NoticeFeedback>(&query);
        let insert = match notice {
            NoticeRef::Id(id) => insert.bind(*id),
            NoticeRef::Code(code) => insert.bind(code),
        };
        insert
            .bind(input.is_helpful)
            .bind(&input.comments)
            .fetch_optional(pool)
            .await
    }

    /// All feedback for one notice type, newest first.
    pub async fn list_for_notice(
        pool: &PgPool,
        notice_type_id: DbId,
    ) -> Result<Vec<NoticeFeedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notice_feedback \
             WHERE notice_type_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, NoticeFeedback>(&query)
            .bind(notice_type_id)
            .fetch_all(pool)
            .await
    }

    /// Helpful / not-helpful counts plus the latest commented rows.
    pub async fn summary_for_notice(
        pool: &PgPool,
        notice_type_id: DbId,
        recent_limit: i64,
    ) -> Result<FeedbackSummary, sqlx::Error> {
        let (total, helpful): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_helpful) \
             FROM notice_feedback WHERE notice_type_id = $1",
        )
        .bind(notice_type_id)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM notice_feedback \
             WHERE notice_type_id = $1 AND comments IS NOT NULL \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        let recent_comments = sqlx::query_as::<_, NoticeFeedback>(&query)
            .bind(notice_type_id)
            .bind(recent_limit)
            .fetch_all(pool)
            .await?;

        Ok(FeedbackSummary {
            notice_type_id,
            total,
            helpful,
            not_helpful: total - helpful,
            recent_comments,
        })
    }
}
