//! Public JSON representations.
//!
//! Each representation has a fixed field list and is built by an explicit
//! mapping function, so internal columns (`is_active`, `created_at`,
//! keyword ids) never leak through the public API.

use complia_core::types::{DbId, Timestamp};
use complia_db::models::notice_feedback::NoticeFeedback;
use complia_db::models::notice_type::NoticeTypeWithTriggers;
use serde::Serialize;

/// A notice type as served by `GET /api/notices/` and `GET /api/notices/{code}/`.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeRepresentation {
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
    /// Keyword texts in insertion order.
    pub triggers: Vec<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// A stored feedback record as returned by `POST /api/feedback/`.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRepresentation {
    /// Numeric id of the notice type the feedback refers to.
    pub notice: DbId,
    pub is_helpful: bool,
    pub comments: Option<String>,
    pub created_at: Timestamp,
}

pub fn notice_representation(entry: &NoticeTypeWithTriggers) -> NoticeRepresentation {
    let notice = &entry.notice;
    NoticeRepresentation {
        id: notice.id,
        code: notice.code.clone(),
        title: notice.title.clone(),
        summary: notice.summary.clone(),
        detailed_explanation: notice.detailed_explanation.clone(),
        why_received: notice.why_received.clone(),
        common_mistakes: notice.common_mistakes.clone(),
        source_section: notice.source_section.clone(),
        consequences_of_ignoring: notice.consequences_of_ignoring.clone(),
        next_steps: notice.next_steps.clone(),
        severity: notice.severity.clone(),
        triggers: entry.triggers.iter().map(|t| t.keyword.clone()).collect(),
        verified_by: notice.verified_by.clone(),
        verified_at: notice.verified_at,
        updated_at: notice.updated_at,
    }
}

pub fn feedback_representation(feedback: &NoticeFeedback) -> FeedbackRepresentation {
    FeedbackRepresentation {
        notice: feedback.notice_type_id,
        is_helpful: feedback.is_helpful,
        comments: feedback.comments.clone(),
        created_at: feedback.created_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use complia_db::models::notice_type::NoticeType;
    use complia_db::models::trigger_keyword::TriggerKeyword;

    use super::*;

    const PUBLIC_FIELDS: &[&str] = &[
        "id",
        "code",
        "title",
        "summary",
        "detailed_explanation",
        "why_received",
        "common_mistakes",
        "source_section",
        "consequences_of_ignoring",
        "next_steps",
        "severity",
        "triggers",
        "verified_by",
        "verified_at",
        "updated_at",
    ];

    fn sample() -> NoticeTypeWithTriggers {
        let now = Utc::now();
        let keyword = |id, keyword: &str| TriggerKeyword {
            id,
            notice_type_id: 1,
            keyword: keyword.to_string(),
            created_at: now,
            updated_at: now,
        };
        NoticeTypeWithTriggers {
            notice: NoticeType {
                id: 1,
                code: "GST-DRC-07".into(),
                title: "Summary of the Order (Final Demand)".into(),
                summary: "The final order confirming that you owe tax.".into(),
                detailed_explanation: "Issued after the DRC-01 process.".into(),
                why_received: String::new(),
                common_mistakes: String::new(),
                source_section: "CGST Act Section 73/74".into(),
                consequences_of_ignoring: "Recovery proceedings will start.".into(),
                next_steps: "Pay or appeal.".into(),
                severity: "high".into(),
                verified_by: Some("Founder".into()),
                verified_at: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            },
            triggers: vec![keyword(10, "DRC-07"), keyword(11, "Recovery Order")],
        }
    }

    #[test]
    fn notice_representation_has_exactly_the_public_fields() {
        let json = serde_json::to_value(notice_representation(&sample())).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        let mut expected = PUBLIC_FIELDS.to_vec();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn triggers_are_plain_strings_in_order() {
        let json = serde_json::to_value(notice_representation(&sample())).unwrap();
        assert_eq!(json["triggers"], serde_json::json!(["DRC-07", "Recovery Order"]));
        assert!(json.get("is_active").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn feedback_representation_references_notice_id() {
        let now = Utc::now();
        let feedback = NoticeFeedback {
            id: 5,
            notice_type_id: 1,
            is_helpful: false,
            comments: Some("Missing the appeal deadline".into()),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(feedback_representation(&feedback)).unwrap();
        assert_eq!(json["notice"], 1);
        assert_eq!(json["is_helpful"], false);
        assert_eq!(json["comments"], "Missing the appeal deadline");
        assert!(json.get("id").is_none());
    }
}
