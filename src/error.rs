use thiserror::Error;

/// Errors that can occur while validating a form's fields and rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Field id '{0}' is used by more than one field")]
    DuplicateFieldId(String),

    #[error("Rule id '{0}' is used by more than one rule")]
    DuplicateRuleId(String),

    #[error("Rule '{rule_id}' references field '{field_id}', which does not exist in the form")]
    DanglingReference { rule_id: String, field_id: String },
}

/// Errors that can occur when importing a form from an external format.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Invalid JSON format: {0}")]
    JsonParseError(String),

    #[error("Invalid form data: missing fields array")]
    MissingFields,

    #[error("Unsupported export version '{0}'")]
    UnsupportedVersion(String),
}

/// Errors that can occur while saving or loading compiled logic snapshots.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },
}
