//! Feedback submission rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::notice;
use crate::types::DbId;

/// Maximum length of free-text feedback comments in characters.
pub const MAX_COMMENTS_LENGTH: usize = 2_000;

/// How a feedback submission refers to its notice: by numeric id or by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoticeRef {
    Id(DbId),
    Code(String),
}

impl NoticeRef {
    /// Reject a code no stored notice can have.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            NoticeRef::Code(code) => notice::validate_storable("notice", code),
            NoticeRef::Id(_) => Ok(()),
        }
    }

    /// The numeric id carried by a string reference such as `"7"`, tried
    /// when no notice has that code.
    pub fn fallback_id(&self) -> Option<DbId> {
        match self {
            NoticeRef::Code(code) => code.trim().parse().ok(),
            NoticeRef::Id(_) => None,
        }
    }
}

impl fmt::Display for NoticeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeRef::Id(id) => write!(f, "{id}"),
            NoticeRef::Code(code) => f.write_str(code),
        }
    }
}

/// Normalize optional comments: blank comments are dropped, surrounding
/// whitespace is trimmed, and NUL and the length limit are rejected.
pub fn normalize_comments(comments: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(text) = comments.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    notice::validate_storable("comments", text)?;
    if text.chars().count() > MAX_COMMENTS_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comments exceed maximum length of {MAX_COMMENTS_LENGTH} characters"
        )));
    }
    Ok(Some(text.to_string()))
}

/// `is_helpful` is mandatory on every submission.
pub fn require_is_helpful(is_helpful: Option<bool>) -> Result<bool, CoreError> {
    is_helpful.ok_or_else(|| CoreError::Validation("Field 'is_helpful' is required".into()))
}
