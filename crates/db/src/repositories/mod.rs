//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod notice_feedback_repo;
pub mod notice_type_repo;
pub mod trigger_keyword_repo;

pub use notice_feedback_repo::NoticeFeedbackRepo;
pub use notice_type_repo::NoticeTypeRepo;
pub use trigger_keyword_repo::TriggerKeywordRepo;
