//! Notice catalog rules: severity levels, field validation, and the search
//! matching contract.
//!
//! [`SearchQuery::matches`] is the storage-independent definition of a
//! search hit. The repository layer translates the same rule into SQL
//! (`ILIKE` with [`like_pattern`]) and its tests check that both agree.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a notice code (e.g. `GST-ASMT-10`).
pub const MAX_CODE_LENGTH: usize = 50;

/// Maximum length of a notice title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of the statutory source reference (e.g. `CGST Act Section 61`).
pub const MAX_SOURCE_SECTION_LENGTH: usize = 100;

/// Maximum length of the verifier's name.
pub const MAX_VERIFIED_BY_LENGTH: usize = 100;

/// Maximum length of a single trigger keyword.
pub const MAX_KEYWORD_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

pub const SEVERITY_LOW: &str = "low";
pub const SEVERITY_MEDIUM: &str = "medium";
pub const SEVERITY_HIGH: &str = "high";

/// Severity assigned when none is given.
pub const DEFAULT_SEVERITY: &str = SEVERITY_MEDIUM;

/// All valid severity values, lowest first.
pub const VALID_SEVERITIES: &[&str] = &[SEVERITY_LOW, SEVERITY_MEDIUM, SEVERITY_HIGH];

/// Validate that the severity string is one of the accepted values.
pub fn validate_severity(severity: &str) -> Result<(), CoreError> {
    if VALID_SEVERITIES.contains(&severity) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid severity '{severity}'. Must be one of: {}",
            VALID_SEVERITIES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate a notice code: non-empty, no whitespace or control characters,
/// within the length limit.
pub fn validate_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() {
        return Err(CoreError::Validation("Notice code cannot be empty".into()));
    }
    if code.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(CoreError::Validation(format!(
            "Notice code '{}' must not contain whitespace or control characters",
            code.escape_debug()
        )));
    }
    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Notice code exceeds maximum length of {MAX_CODE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a notice title: non-blank and within the length limit.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Notice title cannot be empty".into()));
    }
    validate_max_length("title", title, MAX_TITLE_LENGTH)
}

/// Validate a trigger keyword: non-blank and within the length limit.
pub fn validate_keyword(keyword: &str) -> Result<(), CoreError> {
    if keyword.trim().is_empty() {
        return Err(CoreError::Validation("Trigger keyword cannot be empty".into()));
    }
    validate_max_length("keyword", keyword, MAX_KEYWORD_LENGTH)
}

/// Reject text containing NUL, which a Postgres `TEXT` column cannot hold.
pub fn validate_storable(field: &str, value: &str) -> Result<(), CoreError> {
    if value.contains('\0') {
        return Err(CoreError::Validation(format!(
            "Field '{field}' must not contain NUL characters"
        )));
    }
    Ok(())
}

/// Validate that a text field is storable and fits within `max` characters.
pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    validate_storable(field, value)?;
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "Field '{field}' exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A parsed public search request.
///
/// An empty or whitespace-only query means "everything": it behaves exactly
/// like the unfiltered active listing. A query containing NUL can never
/// match stored text and parses to [`SearchQuery::NoMatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    All,
    NoMatch,
    Term(String),
}

/// The searchable text of one notice.
#[derive(Debug, Clone, Copy)]
pub struct NoticeSearchFields<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
    pub keywords: &'a [&'a str],
}

impl SearchQuery {
    /// Parse raw user input. Surrounding whitespace is ignored; inner
    /// whitespace is part of the term (`"ASMT 10"` is one term).
    pub fn parse(raw: &str) -> Self {
        let term = raw.trim();
        if term.is_empty() {
            SearchQuery::All
        } else if term.contains('\0') {
            SearchQuery::NoMatch
        } else {
            SearchQuery::Term(term.to_string())
        }
    }

    /// Case-insensitive substring match on code, title, summary, or any
    /// keyword.
    pub fn matches(&self, fields: &NoticeSearchFields<'_>) -> bool {
        let term = match self {
            SearchQuery::All => return true,
            SearchQuery::NoMatch => return false,
            SearchQuery::Term(term) => term.to_lowercase(),
        };
        let hit = |text: &str| text.to_lowercase().contains(&term);

        hit(fields.code)
            || hit(fields.title)
            || fields.keywords.iter().any(|k| hit(k))
            || hit(fields.summary)
    }
}

/// The `ILIKE` pattern for a search term.
///
/// The term is escaped so `%`, `_` and `\` match literally.
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Escape `LIKE` metacharacters using the default `\` escape character.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ASMT_KEYWORDS: &[&str] = &["ASMT 10", "scrutiny", "discrepancy", "u/s 61"];

    fn asmt10() -> NoticeSearchFields<'static> {
        NoticeSearchFields {
            code: "GST-ASMT-10",
            title: "Scrutiny of Returns",
            summary: "A preliminary inquiry notice asking to explain discrepancies.",
            keywords: ASMT_KEYWORDS,
        }
    }

    fn summons() -> NoticeSearchFields<'static> {
        NoticeSearchFields {
            code: "GST-SUMMONS",
            title: "Summons to Appear for Evidence",
            summary: "An order to appear in person before a GST officer.",
            keywords: &["Section 70"],
        }
    }

    // -- severity -------------------------------------------------------------

    #[test]
    fn known_severities_are_valid() {
        for severity in VALID_SEVERITIES {
            assert!(validate_severity(severity).is_ok());
        }
    }

    #[test]
    fn unknown_severity_is_rejected() {
        assert_matches!(validate_severity("critical"), Err(CoreError::Validation(_)));
        assert_matches!(validate_severity("HIGH"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn default_severity_is_medium() {
        assert_eq!(DEFAULT_SEVERITY, "medium");
    }

    // -- field validation -----------------------------------------------------

    #[test]
    fn code_rules() {
        assert!(validate_code("GST-ASMT-10").is_ok());
        assert_matches!(validate_code(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_code("GST ASMT"), Err(CoreError::Validation(_)));
        assert_matches!(validate_code("GST\0X"), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_code(&"X".repeat(MAX_CODE_LENGTH + 1)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_code(&"X".repeat(MAX_CODE_LENGTH)).is_ok());
    }

    #[test]
    fn title_must_not_be_blank() {
        assert!(validate_title("Scrutiny of Returns").is_ok());
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn keyword_rules() {
        assert!(validate_keyword("u/s 61").is_ok());
        assert_matches!(validate_keyword(""), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_keyword(&"k".repeat(MAX_KEYWORD_LENGTH + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn nul_is_not_storable() {
        assert!(validate_storable("summary", "plain text").is_ok());
        assert_matches!(
            validate_storable("summary", "bad\0"),
            Err(CoreError::Validation(msg)) if msg.contains("summary")
        );
        assert_matches!(validate_title("Title\0"), Err(CoreError::Validation(_)));
        assert_matches!(validate_keyword("key\0word"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn max_length_counts_characters_not_bytes() {
        let rupees = "₹".repeat(10);
        assert!(validate_max_length("source_section", &rupees, 10).is_ok());
    }

    // -- query parsing --------------------------------------------------------

    #[test]
    fn empty_and_blank_queries_match_everything() {
        assert_eq!(SearchQuery::parse(""), SearchQuery::All);
        assert_eq!(SearchQuery::parse("   \t"), SearchQuery::All);
        assert!(SearchQuery::All.matches(&asmt10()));
    }

    #[test]
    fn nul_in_query_matches_nothing() {
        assert_eq!(SearchQuery::parse("a\0b"), SearchQuery::NoMatch);
        assert_eq!(SearchQuery::parse(" \0 "), SearchQuery::NoMatch);
        assert!(!SearchQuery::NoMatch.matches(&asmt10()));
    }

    #[test]
    fn parse_trims_but_keeps_inner_whitespace() {
        assert_eq!(
            SearchQuery::parse("  ASMT 10 "),
            SearchQuery::Term("ASMT 10".into())
        );
    }

    // -- matching -------------------------------------------------------------

    #[test]
    fn keyword_hit_and_miss() {
        assert!(SearchQuery::parse("scrutiny").matches(&asmt10()));
        assert!(!SearchQuery::parse("scrutinyX").matches(&asmt10()));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let fields = NoticeSearchFields {
            code: "GST-DRC-01",
            title: "Show Cause Notice (Demand Order)",
            summary: "",
            keywords: &[],
        };
        for q in ["drc-01", "DRC-01", "Drc-01"] {
            assert!(SearchQuery::parse(q).matches(&fields), "query {q}");
        }
    }

    #[test]
    fn title_matches_without_keyword() {
        assert!(SearchQuery::parse("Summons").matches(&summons()));
        assert!(SearchQuery::parse("evidence").matches(&summons()));
    }

    #[test]
    fn summary_matches() {
        assert!(SearchQuery::parse("preliminary inquiry").matches(&asmt10()));
    }

    #[test]
    fn partial_keyword_matches() {
        assert!(SearchQuery::parse("s 6").matches(&asmt10()));
    }

    #[test]
    fn detailed_fields_are_not_searched() {
        let fields = NoticeSearchFields {
            code: "GSTR-3A",
            title: "Notice to Return Defaulter",
            summary: "Automated notice sent for missing a return filing deadline.",
            keywords: &["Late Fee Notice"],
        };
        assert!(!SearchQuery::parse("Nil Return").matches(&fields));
    }

    // -- LIKE escaping --------------------------------------------------------

    #[test]
    fn like_pattern_wraps_term() {
        assert_eq!(like_pattern("scrutiny"), "%scrutiny%");
        assert_eq!(like_pattern("200%"), "%200\\%%");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("u\\s"), "u\\\\s");
        assert_eq!(escape_like("u/s 61"), "u/s 61");
    }

    #[test]
    fn percent_is_literal_in_matching() {
        assert!(!SearchQuery::parse("%").matches(&asmt10()));
    }
}
