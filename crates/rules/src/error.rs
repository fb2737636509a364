//! Rule errors

use thiserror::Error;

/// Errors from rules and the rule engine
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("RU02: {rule} does not implement this operation")]
    NotImplemented { rule: String },

    #[error("Rule {0} completed without reporting a verdict")]
    MissingVerdict(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type for rule operations
pub type RuleResult<T> = Result<T, RuleError>;

impl RuleError {
    /// Create a not-implemented error for a rule
    pub fn not_implemented(rule: impl Into<String>) -> Self {
        RuleError::NotImplemented { rule: rule.into() }
    }

    /// Stable code for errors surfaced to token callers
    pub fn code(&self) -> Option<&'static str> {
        match self {
            RuleError::NotImplemented { .. } => Some("RU02"),
            _ => None,
        }
    }

    /// Check if this is a not-implemented rejection
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, RuleError::NotImplemented { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_code() {
        let err = RuleError::not_implemented("user_freeze_rule");
        assert!(err.is_not_implemented());
        assert_eq!(err.code(), Some("RU02"));
        assert!(err.to_string().starts_with("RU02"));
        assert!(err.to_string().contains("user_freeze_rule"));
    }

    #[test]
    fn test_other_errors_have_no_code() {
        let err = RuleError::MissingVerdict("silent".to_string());
        assert!(!err.is_not_implemented());
        assert_eq!(err.code(), None);
    }
}
