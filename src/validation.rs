//! Submit-time validation. Runs on a projection, so fields hidden or made
//! optional by logic rules are not required.

use crate::ast::{Answers, Value};
use crate::form::{FieldKind, FormField};
use crate::projection::Projection;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Required,
    InvalidEmail,
    InvalidNumber,
    TooShort,
    TooLong,
    BelowMinimum,
    AboveMaximum,
    PatternMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field_id: String,
    pub kind: IssueKind,
    pub message: String,
}

/// Every issue found in a submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[FieldIssue] {
        &self.0
    }

    pub fn for_field<'a>(&'a self, field_id: &'a str) -> impl Iterator<Item = &'a FieldIssue> {
        self.0.iter().filter(move |i| i.field_id == field_id)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", issue.field_id, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a submission against the projected field state.
pub fn validate_submission(
    fields: &[FormField],
    projection: &Projection,
    values: &Answers,
) -> Result<(), ValidationErrors> {
    let issues: Vec<FieldIssue> = fields
        .iter()
        .filter(|f| f.kind.collects_input() && projection.is_visible(&f.id))
        .flat_map(|f| check_field(f, projection.is_required(&f.id), values.get(&f.id)))
        .collect();

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(issues))
    }
}

/// The answers that should be stored: visible, input-collecting fields only.
pub fn prepare_submission(
    fields: &[FormField],
    projection: &Projection,
    values: &Answers,
) -> Answers {
    fields
        .iter()
        .filter(|f| f.kind.collects_input() && projection.is_visible(&f.id))
        .filter_map(|f| values.get(&f.id).map(|v| (f.id.clone(), v.clone())))
        .collect()
}

fn check_field(field: &FormField, required: bool, value: Option<&Value>) -> Vec<FieldIssue> {
    let issue = |kind, message: String| FieldIssue {
        field_id: field.id.clone(),
        kind,
        message,
    };

    let Some(value) = value.filter(|v| v.is_answered()) else {
        return if required {
            vec![issue(IssueKind::Required, format!("{} is required", field.label))]
        } else {
            Vec::new()
        };
    };

    let mut issues = Vec::new();

    if field.kind == FieldKind::Email && !value.as_text().is_some_and(|s| EMAIL.is_match(s)) {
        issues.push(issue(
            IssueKind::InvalidEmail,
            "Please enter a valid email".to_string(),
        ));
    }

    let number = value.as_number();
    if field.kind.is_numeric() && number.is_none() {
        issues.push(issue(
            IssueKind::InvalidNumber,
            "Please enter a valid number".to_string(),
        ));
    }

    let rules = &field.validations;
    if let Some(text) = value.as_text() {
        let length = text.chars().count();
        if let Some(min) = rules.min_length.filter(|&min| length < min) {
            issues.push(issue(
                IssueKind::TooShort,
                format!("{} must be at least {} characters", field.label, min),
            ));
        }
        if let Some(max) = rules.max_length.filter(|&max| length > max) {
            issues.push(issue(
                IssueKind::TooLong,
                format!("{} must be at most {} characters", field.label, max),
            ));
        }
        // Invalid patterns are reported by the compiler and skipped here.
        let pattern = rules.pattern.as_deref().and_then(|p| compile_pattern(p).ok());
        if pattern.is_some_and(|re| !re.is_match(text)) {
            issues.push(issue(
                IssueKind::PatternMismatch,
                "Please match the requested format".to_string(),
            ));
        }
    }
    if let Some(n) = number {
        if let Some(min) = rules.min_value.filter(|&min| n < min) {
            issues.push(issue(
                IssueKind::BelowMinimum,
                format!("{} must be at least {}", field.label, Value::Number(min)),
            ));
        }
        if let Some(max) = rules.max_value.filter(|&max| n > max) {
            issues.push(issue(
                IssueKind::AboveMaximum,
                format!("{} must be at most {}", field.label, Value::Number(max)),
            ));
        }
    }

    issues
}

/// Compiles a field pattern. Like an HTML `pattern`, it must match the whole answer.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}
