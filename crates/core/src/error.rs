use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by an id or a code.
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_accepts_ids_and_codes() {
        let by_id = CoreError::not_found("NoticeType", 42);
        let by_code = CoreError::not_found("NoticeType", "GST-DRC-01");

        assert_eq!(by_id.to_string(), "Entity not found: NoticeType '42'");
        assert_eq!(
            by_code.to_string(),
            "Entity not found: NoticeType 'GST-DRC-01'"
        );
    }
}
