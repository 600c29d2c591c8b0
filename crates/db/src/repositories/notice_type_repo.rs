//! Repository for the `notice_types` table.
//!
//! Public lookups (`list_active`, `find_active_by_code`, `search_active`)
//! never return rows with `is_active = false`. Administrative methods see
//! every row.

use complia_core::notice::{like_pattern, SearchQuery, DEFAULT_SEVERITY};
use complia_core::types::DbId;
use sqlx::PgPool;

use super::TriggerKeywordRepo;
use crate::models::notice_type::{
    CreateNoticeType, NoticeType, NoticeTypeFilter, NoticeTypeWithTriggers, UpdateNoticeType,
};

/// Column list for the `notice_types` table.
const COLUMNS: &str = "id, code, title, summary, detailed_explanation, why_received, \
    common_mistakes, source_section, consequences_of_ignoring, next_steps, severity, \
    verified_by, verified_at, is_active, created_at, updated_at";

/// Byte-wise ordering by code, independent of the database locale.
const ORDER_BY_CODE: &str = "ORDER BY code COLLATE \"C\"";

/// Provides catalog storage and the public lookup/search queries.
pub struct NoticeTypeRepo;

impl NoticeTypeRepo {
    // -----------------------------------------------------------------------
    // Public lookups (active only)
    // -----------------------------------------------------------------------

    /// All active notice types ordered by code, with their keywords.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<NoticeTypeWithTriggers>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notice_types WHERE is_active {ORDER_BY_CODE}");
        let notices = sqlx::query_as::<_, NoticeType>(&query)
            .fetch_all(pool)
            .await?;
        Self::with_triggers(pool, notices).await
    }

    /// Exact code lookup restricted to active notice types.
    pub async fn find_active_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<NoticeTypeWithTriggers>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notice_types WHERE code = $1 AND is_active");
        let notice = sqlx::query_as::<_, NoticeType>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await?;
        match notice {
            Some(notice) => Ok(Self::with_triggers(pool, vec![notice]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Active notice types whose code, title, summary, or any keyword
    /// contains the query (case-insensitive), ordered by code.
    ///
    /// [`SearchQuery::All`] returns the same rows as [`Self::list_active`];
    /// [`SearchQuery::NoMatch`] returns nothing without querying.
    pub async fn search_active(
        pool: &PgPool,
        search: &SearchQuery,
    ) -> Result<Vec<NoticeTypeWithTriggers>, sqlx::Error> {
        let pattern = match search {
            SearchQuery::All => return Self::list_active(pool).await,
            SearchQuery::NoMatch => return Ok(Vec::new()),
            SearchQuery::Term(term) => like_pattern(term),
        };

        let query = format!(
            "SELECT {COLUMNS} FROM notice_types \
             WHERE is_active \
               AND (code ILIKE $1 \
                    OR title ILIKE $1 \
                    OR summary ILIKE $1 \
                    OR EXISTS ( \
                        SELECT 1 FROM trigger_keywords k \
                        WHERE k.notice_type_id = notice_types.id \
                          AND k.keyword ILIKE $1)) \
             {ORDER_BY_CODE}"
        );
        let notices = sqlx::query_as::<_, NoticeType>(&query)
            .bind(&pattern)
            .fetch_all(pool)
            .await?;
        tracing::debug!(pattern = %pattern, hits = notices.len(), "Notice search");
        Self::with_triggers(pool, notices).await
    }

    // -----------------------------------------------------------------------
    // Administrative access (any activity state)
    // -----------------------------------------------------------------------

    /// Insert a new notice type and its keywords in one transaction.
    ///
    /// Fails with a unique violation on `uq_notice_types_code` when the code
    /// is taken. A `verified_by` without `verified_at` is stamped now.
    pub async fn create(pool: &PgPool, input: &CreateNoticeType) -> Result<NoticeType, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO notice_types \
                (code, title, summary, detailed_explanation, why_received, common_mistakes, \
                 source_section, consequences_of_ignoring, next_steps, severity, \
                 verified_by, verified_at, is_active) \
             VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, ''), COALESCE($6, ''), \
                     COALESCE($7, ''), $8, $9, COALESCE($10, $11), \
                     NULLIF($12, ''), \
                     CASE WHEN NULLIF($12::TEXT, '') IS NULL THEN NULL \
                          ELSE COALESCE($13, NOW()) END, \
                     COALESCE($14, false)) \
             RETURNING {COLUMNS}"
        );
        let notice = sqlx::query_as::<_, NoticeType>(&insert_query)
            .bind(&input.code)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.detailed_explanation)
            .bind(&input.why_received)
            .bind(&input.common_mistakes)
            .bind(&input.source_section)
            .bind(&input.consequences_of_ignoring)
            .bind(&input.next_steps)
            .bind(&input.severity)
            .bind(DEFAULT_SEVERITY)
            .bind(&input.verified_by)
            .bind(input.verified_at)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        TriggerKeywordRepo::insert_in_tx(&mut tx, notice.id, &input.triggers).await?;

        tx.commit().await?;
        Ok(notice)
    }

    /// Find a notice type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NoticeType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notice_types WHERE id = $1");
        sqlx::query_as::<_, NoticeType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a notice type by code, active or not.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<NoticeType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notice_types WHERE code = $1");
        sqlx::query_as::<_, NoticeType>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find a notice type by ID, enriched with its keywords.
    pub async fn find_by_id_with_triggers(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<NoticeTypeWithTriggers>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(notice) => Ok(Self::with_triggers(pool, vec![notice]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List every notice type matching `filter`, ordered by code.
    pub async fn list(
        pool: &PgPool,
        filter: &NoticeTypeFilter,
    ) -> Result<Vec<NoticeTypeWithTriggers>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notice_types \
             WHERE ($1::TEXT IS NULL OR severity = $1) \
               AND ($2::BOOLEAN IS NULL OR is_active = $2) \
               AND ($3::TEXT IS NULL OR verified_by = $3) \
             {ORDER_BY_CODE}"
        );
        let notices = sqlx::query_as::<_, NoticeType>(&query)
            .bind(&filter.severity)
            .bind(filter.is_active)
            .bind(&filter.verified_by)
            .fetch_all(pool)
            .await?;
        Self::with_triggers(pool, notices).await
    }

    /// Update a notice type. Only non-`None` fields are applied.
    ///
    /// If `triggers` is `Some`, replaces all keywords in the same transaction.
    /// Returns `None` if no row with the given `id` exists.
    ///
    /// `verified_by` follows the seed loader: setting it on an unverified row
    /// stamps `verified_at`, and an empty string clears both columns.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNoticeType,
    ) -> Result<Option<NoticeType>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE notice_types SET \
                code = COALESCE($2, code), \
                title = COALESCE($3, title), \
                summary = COALESCE($4, summary), \
                detailed_explanation = COALESCE($5, detailed_explanation), \
                why_received = COALESCE($6, why_received), \
                common_mistakes = COALESCE($7, common_mistakes), \
                source_section = COALESCE($8, source_section), \
                consequences_of_ignoring = COALESCE($9, consequences_of_ignoring), \
                next_steps = COALESCE($10, next_steps), \
                severity = COALESCE($11, severity), \
                verified_by = CASE WHEN $12::TEXT IS NULL THEN verified_by \
                                   ELSE NULLIF($12, '') END, \
                verified_at = CASE \
                    WHEN $12::TEXT = '' THEN NULL \
                    WHEN $13::TIMESTAMPTZ IS NOT NULL \
                         AND COALESCE($12, verified_by) IS NOT NULL THEN $13 \
                    WHEN $12::TEXT IS NOT NULL AND verified_by IS NULL THEN NOW() \
                    ELSE verified_at END, \
                is_active = COALESCE($14, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let notice = sqlx::query_as::<_, NoticeType>(&update_query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.detailed_explanation)
            .bind(&input.why_received)
            .bind(&input.common_mistakes)
            .bind(&input.source_section)
            .bind(&input.consequences_of_ignoring)
            .bind(&input.next_steps)
            .bind(&input.severity)
            .bind(&input.verified_by)
            .bind(input.verified_at)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(notice), Some(triggers)) = (&notice, &input.triggers) {
            TriggerKeywordRepo::replace_in_tx(&mut tx, notice.id, triggers).await?;
        }

        tx.commit().await?;
        Ok(notice)
    }

    /// Hard-delete a notice type. Keywords and feedback go with it.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notice_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Attach keywords to each notice, preserving the order of `notices`.
    async fn with_triggers(
        pool: &PgPool,
        notices: Vec<NoticeType>,
    ) -> Result<Vec<NoticeTypeWithTriggers>, sqlx::Error> {
        let ids: Vec<DbId> = notices.iter().map(|n| n.id).collect();
        let mut keywords = TriggerKeywordRepo::list_for_notices(pool, &ids).await?;

        Ok(notices
            .into_iter()
            .map(|notice| {
                let triggers = keywords.remove(&notice.id).unwrap_or_default();
                NoticeTypeWithTriggers { notice, triggers }
            })
            .collect())
    }
}
