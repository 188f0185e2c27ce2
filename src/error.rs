use thiserror::Error;

/// Errors raised while turning a rubric configuration into a scorer.
#[derive(Debug, Error)]
pub enum RubricError {
    /// Every problem found during validation, in the order they were found.
    #[error("invalid rubric: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("invalid range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl RubricError {
    /// Individual validation messages, one per problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            RubricError::Invalid(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}
