//! Trigger keyword model: a search alias belonging to one notice type.

use complia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `trigger_keywords` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TriggerKeyword {
    pub id: DbId,
    pub notice_type_id: DbId,
    pub keyword: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching a keyword to an existing notice type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTriggerKeyword {
    pub keyword: String,
}
