use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal finding produced while compiling a form's logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A condition reads a field that does not exist. It was dropped.
    DanglingCondition { rule_id: String, field_id: String },
    /// An action targets a field that does not exist. It was dropped.
    DanglingAction { rule_id: String, field_id: String },
    /// A `setValue` action without a value. It was dropped.
    MissingSetValue { rule_id: String, field_id: String },
    /// The rule has no conditions and will never fire.
    EmptyConditions { rule_id: String },
    EmptyActions { rule_id: String },
    /// A field's `pattern` validation is not a valid regex. It is not enforced.
    InvalidPattern {
        field_id: String,
        pattern: String,
        message: String,
    },
}

impl Diagnostic {
    /// The rule the finding belongs to; `None` for field-level findings.
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Diagnostic::DanglingCondition { rule_id, .. }
            | Diagnostic::DanglingAction { rule_id, .. }
            | Diagnostic::MissingSetValue { rule_id, .. }
            | Diagnostic::EmptyConditions { rule_id }
            | Diagnostic::EmptyActions { rule_id } => Some(rule_id),
            Diagnostic::InvalidPattern { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingCondition { rule_id, field_id } => write!(
                f,
                "rule '{}': condition references missing field '{}' and was dropped",
                rule_id, field_id
            ),
            Diagnostic::DanglingAction { rule_id, field_id } => write!(
                f,
                "rule '{}': action targets missing field '{}' and was dropped",
                rule_id, field_id
            ),
            Diagnostic::MissingSetValue { rule_id, field_id } => write!(
                f,
                "rule '{}': setValue on '{}' has no value and was dropped",
                rule_id, field_id
            ),
            Diagnostic::EmptyConditions { rule_id } => {
                write!(f, "rule '{}': no conditions, the rule never fires", rule_id)
            }
            Diagnostic::EmptyActions { rule_id } => {
                write!(f, "rule '{}': no actions", rule_id)
            }
            Diagnostic::InvalidPattern {
                field_id,
                pattern,
                message,
            } => write!(
                f,
                "field '{}': pattern '{}' is not a valid regex ({})",
                field_id, pattern, message
            ),
        }
    }
}
