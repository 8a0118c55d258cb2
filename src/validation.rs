use serde::{Deserialize, Serialize};

// ============================================================================
// Validation Result - Structured rule failures
// ============================================================================
//
// Rule sets push every failure they find; nothing short-circuits, so a caller
// can report all violations at once.
//
// ============================================================================

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationFailure {
            rule: rule.into(),
            message: message.into(),
        });
    }

    /// Record a failure when `passed` is false
    pub fn check(&mut self, passed: bool, rule: &str, message: &str) {
        if !passed {
            self.push(rule, message);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationFailure] {
        &self.errors
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }

    pub fn contains_message(&self, message: &str) -> bool {
        self.messages().any(|m| m == message)
    }
}
