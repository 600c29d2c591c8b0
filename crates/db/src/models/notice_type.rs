//! Notice type entity model and DTOs.
//!
//! A notice type is one catalogued category of tax-authority communication
//! (e.g. `GST-ASMT-10`). Its trigger keywords live in `trigger_keywords` and
//! are loaded alongside it as [`NoticeTypeWithTriggers`].

use complia_core::notice::{NoticeSearchFields, SearchQuery};
use complia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::trigger_keyword::TriggerKeyword;

/// A row from the `notice_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoticeType {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub summary: String,
    pub detailed_explanation: String,
    pub why_received: String,
    pub common_mistakes: String,
    pub source_section: String,
    pub consequences_of_ignoring: String,
    pub next_steps: String,
    pub severity: String,
    pub verified_by: Option<String>,
    pub verified_at: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A notice type enriched with its keywords in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeTypeWithTriggers {
    #[serde(flatten)]
    pub notice: NoticeType,
    pub triggers: Vec<TriggerKeyword>,
}

impl NoticeTypeWithTriggers {
    /// Keyword texts in insertion order.
    pub fn keywords(&self) -> Vec<&str> {
        self.triggers.iter().map(|t| t.keyword.as_str()).collect()
    }

    /// Evaluate `query` against this notice without touching the database.
    pub fn matches(&self, query: &SearchQuery) -> bool {
        let keywords = self.keywords();
        query.matches(&NoticeSearchFields {
            code: &self.notice.code,
            title: &self.notice.title,
            summary: &self.notice.summary,
            keywords: &keywords,
        })
    }
}

/// DTO for creating a new notice type.
///
/// Omitted optional text fields are stored as empty strings; `severity`
/// defaults to `medium` and `is_active` to `false`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoticeType {
    pub code: String,
    pub title: String,
    pub summary: Option<String>,
    pub detailed_explanation: String,
    pub why_received: Option<String>,
    pub common_mistakes: Option<String>,
    pub source_section: Option<String>,
    pub consequences_of_ignoring: String,
    pub next_steps: String,
    pub severity: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<Timestamp>,
    pub is_active: Option<bool>,
    /// Keywords to attach, in the order given.
    #[serde(default)]
    pub triggers: Vec<String>,
}

/// DTO for updating an existing notice type. Only non-`None` fields apply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoticeType {
    pub code: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub detailed_explanation: Option<String>,
    pub why_received: Option<String>,
    pub common_mistakes: Option<String>,
    pub source_section: Option<String>,
    pub consequences_of_ignoring: Option<String>,
    pub next_steps: Option<String>,
    pub severity: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<Timestamp>,
    pub is_active: Option<bool>,
    /// If `Some`, replaces all keywords. If `None`, leaves them unchanged.
    pub triggers: Option<Vec<String>>,
}

/// Filters for the administrative listing. `None` means "any".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoticeTypeFilter {
    pub severity: Option<String>,
    pub is_active: Option<bool>,
    pub verified_by: Option<String>,
}
