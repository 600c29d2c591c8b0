//! Versioned notice fixtures and the bootstrap routine that loads them.
//!
//! The catalog content (codes, explanations, keywords) lives in
//! `db/fixtures/notices.json`, outside application logic. [`apply`] upserts
//! every fixture notice by `code` in a single transaction, so re-running it
//! is idempotent and existing rows keep their ids (and their feedback).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use complia_core::error::CoreError;
use complia_core::notice;
use serde::Deserialize;
use sqlx::PgPool;

use crate::repositories::TriggerKeywordRepo;

/// Fixture format versions this loader understands.
pub const SUPPORTED_FIXTURE_VERSIONS: &[u32] = &[1];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported fixture version {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid fixture notice '{code}': {source}")]
    Invalid { code: String, source: CoreError },

    #[error("Duplicate notice code '{0}' in fixture")]
    DuplicateCode(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Top-level fixture document.
#[derive(Debug, Clone, Deserialize)]
pub struct NoticeFixture {
    pub version: u32,
    pub notices: Vec<FixtureNotice>,
}

/// One notice type as described in the fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureNotice {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub detailed_explanation: String,
    #[serde(default)]
    pub why_received: String,
    #[serde(default)]
    pub common_mistakes: String,
    #[serde(default)]
    pub source_section: String,
    pub consequences_of_ignoring: String,
    pub next_steps: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    pub verified_by: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub triggers: Vec<String>,
}

fn default_severity() -> String {
    notice::DEFAULT_SEVERITY.to_string()
}

/// Outcome of one [`apply`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub updated: usize,
    pub keywords: usize,
}

impl NoticeFixture {
    /// Read and validate a fixture file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a fixture document.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let fixture: NoticeFixture = serde_json::from_str(raw)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Check version, per-notice field rules, and code uniqueness.
    pub fn validate(&self) -> Result<(), SeedError> {
        if !SUPPORTED_FIXTURE_VERSIONS.contains(&self.version) {
            return Err(SeedError::UnsupportedVersion(self.version));
        }

        let mut seen = HashSet::new();
        for entry in &self.notices {
            entry.validate().map_err(|source| SeedError::Invalid {
                code: entry.code.clone(),
                source,
            })?;
            if !seen.insert(entry.code.as_str()) {
                return Err(SeedError::DuplicateCode(entry.code.clone()));
            }
        }
        Ok(())
    }
}

impl FixtureNotice {
    fn validate(&self) -> Result<(), CoreError> {
        notice::validate_code(&self.code)?;
        notice::validate_title(&self.title)?;
        notice::validate_severity(&self.severity)?;
        notice::validate_max_length(
            "source_section",
            &self.source_section,
            notice::MAX_SOURCE_SECTION_LENGTH,
        )?;
        if let Some(verified_by) = &self.verified_by {
            notice::validate_max_length(
                "verified_by",
                verified_by,
                notice::MAX_VERIFIED_BY_LENGTH,
            )?;
        }
        for keyword in &self.triggers {
            notice::validate_keyword(keyword)?;
        }
        Ok(())
    }
}

/// Upsert every fixture notice by code and replace its keywords.
///
/// `verified_at` is stamped the first time a notice carries `verified_by`
/// and cleared when `verified_by` is removed. Notices absent from the
/// fixture are left alone.
pub async fn apply(pool: &PgPool, fixture: &NoticeFixture) -> Result<SeedReport, SeedError> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for entry in &fixture.notices {
        let (id, inserted): (i64, bool) = sqlx::query_as(
            "INSERT INTO notice_types \
                (code, title, summary, detailed_explanation, why_received, common_mistakes, \
                 source_section, consequences_of_ignoring, next_steps, severity, \
                 verified_by, verified_at, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                     $11::TEXT, CASE WHEN $11::TEXT IS NULL THEN NULL ELSE NOW() END, $12) \
             ON CONFLICT (code) DO UPDATE SET \
                title = EXCLUDED.title, \
                summary = EXCLUDED.summary, \
                detailed_explanation = EXCLUDED.detailed_explanation, \
                why_received = EXCLUDED.why_received, \
                common_mistakes = EXCLUDED.common_mistakes, \
                source_section = EXCLUDED.source_section, \
                consequences_of_ignoring = EXCLUDED.consequences_of_ignoring, \
                next_steps = EXCLUDED.next_steps, \
                severity = EXCLUDED.severity, \
                verified_by = EXCLUDED.verified_by, \
                verified_at = CASE \
                    WHEN EXCLUDED.verified_by IS NULL THEN NULL \
                    ELSE COALESCE(notice_types.verified_at, EXCLUDED.verified_at) END, \
                is_active = EXCLUDED.is_active \
             RETURNING id, (xmax = 0) AS inserted",
        )
        .bind(&entry.code)
        .bind(&entry.title)
        .bind(&entry.summary)
        .bind(&entry.detailed_explanation)
        .bind(&entry.why_received)
        .bind(&entry.common_mistakes)
        .bind(&entry.source_section)
        .bind(&entry.consequences_of_ignoring)
        .bind(&entry.next_steps)
        .bind(&entry.severity)
        .bind(&entry.verified_by)
        .bind(entry.is_active)
        .fetch_one(&mut *tx)
        .await?;

        TriggerKeywordRepo::replace_in_tx(&mut tx, id, &entry.triggers).await?;

        if inserted {
            report.inserted += 1;
        } else {
            report.updated += 1;
        }
        report.keywords += entry.triggers.len();
        tracing::debug!(id, code = %entry.code, inserted, "Seeded notice type");
    }

    tx.commit().await?;
    tracing::info!(
        inserted = report.inserted,
        updated = report.updated,
        keywords = report.keywords,
        "Notice fixture applied"
    );
    Ok(report)
}
