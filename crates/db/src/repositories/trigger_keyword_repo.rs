//! Repository for the `trigger_keywords` table.

use std::collections::HashMap;

use complia_core::types::DbId;
use sqlx::PgPool;

use crate::models::trigger_keyword::TriggerKeyword;

/// Column list for the `trigger_keywords` table.
const COLUMNS: &str = "id, notice_type_id, keyword, created_at, updated_at";

/// Keyword storage for notice types. Keywords are always returned in
/// insertion order (ascending `id`).
pub struct TriggerKeywordRepo;

impl TriggerKeywordRepo {
    /// All keywords of one notice type.
    pub async fn list_for_notice(
        pool: &PgPool,
        notice_type_id: DbId,
    ) -> Result<Vec<TriggerKeyword>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM trigger_keywords \
             WHERE notice_type_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, TriggerKeyword>(&query)
            .bind(notice_type_id)
            .fetch_all(pool)
            .await
    }

    /// Keywords for many notice types in one round trip, grouped by notice id.
    pub async fn list_for_notices(
        pool: &PgPool,
        notice_type_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TriggerKeyword>>, sqlx::Error> {
        if notice_type_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!(
            "SELECT {COLUMNS} FROM trigger_keywords \
             WHERE notice_type_id = ANY($1) \
             ORDER BY notice_type_id, id"
        );
        let rows = sqlx::query_as::<_, TriggerKeyword>(&query)
            .bind(notice_type_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<TriggerKeyword>> = HashMap::new();
        for row in rows {
            grouped.entry(row.notice_type_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Append one keyword to a notice type and bump the parent's `updated_at`.
    pub async fn add(
        pool: &PgPool,
        notice_type_id: DbId,
        keyword: &str,
    ) -> Result<TriggerKeyword, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO trigger_keywords (notice_type_id, keyword) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, TriggerKeyword>(&query)
            .bind(notice_type_id)
            .bind(keyword)
            .fetch_one(&mut *tx)
            .await?;

        touch_notice(&mut tx, notice_type_id).await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Remove one keyword from a notice type.
    ///
    /// Returns `true` if the keyword existed and belonged to that notice.
    pub async fn remove(
        pool: &PgPool,
        notice_type_id: DbId,
        keyword_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM trigger_keywords \
             WHERE id = $1 AND notice_type_id = $2",
        )
        .bind(keyword_id)
        .bind(notice_type_id)
        .execute(&mut *tx)
        .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            touch_notice(&mut tx, notice_type_id).await?;
        }
        tx.commit().await?;
        Ok(removed)
    }

    /// Replace all keywords of a notice type within an existing transaction.
    ///
    /// Deletes existing rows, then inserts `keywords` in the given order.
    pub async fn replace_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        notice_type_id: DbId,
        keywords: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM trigger_keywords WHERE notice_type_id = $1")
            .bind(notice_type_id)
            .execute(&mut **tx)
            .await?;

        Self::insert_in_tx(tx, notice_type_id, keywords).await
    }

    /// Insert `keywords` in order within an existing transaction.
    pub async fn insert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        notice_type_id: DbId,
        keywords: &[String],
    ) -> Result<(), sqlx::Error> {
        for keyword in keywords {
            sqlx::query("INSERT INTO trigger_keywords (notice_type_id, keyword) VALUES ($1, $2)")
                .bind(notice_type_id)
                .bind(keyword)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}

/// Keyword edits count as a mutation of the parent notice type.
async fn touch_notice(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    notice_type_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE notice_types SET updated_at = NOW() WHERE id = $1")
        .bind(notice_type_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
