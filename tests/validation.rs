//! Tests for submit-time validation on top of a projection.
mod common;
use common::*;
use formlogic::prelude::*;
use formlogic::validation::{IssueKind, ValidationErrors};

fn check(rules: &[LogicRule], values: &Answers) -> std::result::Result<(), ValidationErrors> {
    let fields = contact_fields();
    let projection = project(&fields, &evaluate(rules, values));
    validate_submission(&fields, &projection, values)
}

#[test]
fn test_valid_submission() {
    let values = answers([
        ("contactMethod", Value::from("email")),
        ("email", Value::from("ada@example.com")),
        ("rating", Value::from(4.0)),
    ]);
    assert!(check(&[low_rating_rule()], &values).is_ok());
}

#[test]
fn test_missing_required_field() {
    let errors = check(&[], &Answers::new()).unwrap_err();

    assert_eq!(errors.issues().len(), 1);
    let issue = &errors.issues()[0];
    assert_eq!(issue.field_id, "email");
    assert_eq!(issue.kind, IssueKind::Required);
    assert_eq!(issue.message, "Email is required");
}

#[test]
fn test_empty_text_counts_as_missing() {
    let errors = check(&[], &answers([("email", Value::from(""))])).unwrap_err();
    assert_eq!(errors.issues()[0].kind, IssueKind::Required);
}

#[test]
fn test_hidden_required_field_is_not_enforced() {
    let hide_email = LogicRule::new("hide-email", "hide email", ConditionType::All)
        .when(LogicCondition::new(
            "contactMethod",
            ConditionOperator::Equals,
            Some(Value::from("phone")),
        ))
        .then(LogicAction::new(ActionKind::Hide, "email"));

    let values = answers([("contactMethod", Value::from("phone"))]);
    assert!(check(&[hide_email], &values).is_ok());
}

#[test]
fn test_rule_required_field_is_enforced() {
    let values = answers([
        ("email", Value::from("ada@example.com")),
        ("rating", Value::from(1.0)),
    ]);
    let errors = check(&[low_rating_rule()], &values).unwrap_err();

    let issues: Vec<_> = errors.for_field("comments").collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "Comments is required");
}

#[test]
fn test_invalid_email() {
    for address in ["not-an-email", "a@b", "two words@example.com", "@example.com"] {
        let errors = check(&[], &answers([("email", Value::from(address))])).unwrap_err();
        assert_eq!(errors.issues()[0].kind, IssueKind::InvalidEmail, "{}", address);
        assert_eq!(errors.issues()[0].message, "Please enter a valid email");
    }
}

#[test]
fn test_invalid_number() {
    let values = answers([
        ("email", Value::from("ada@example.com")),
        ("rating", Value::from("lots")),
    ]);
    let errors = check(&[], &values).unwrap_err();

    assert_eq!(errors.issues()[0].field_id, "rating");
    assert_eq!(errors.issues()[0].kind, IssueKind::InvalidNumber);
}

#[test]
fn test_length_and_range_limits() {
    let mut fields = contact_fields();
    for field in fields.iter_mut() {
        match field.id.as_str() {
            "comments" => {
                field.validations.min_length = Some(5);
                field.validations.max_length = Some(10);
            }
            "rating" => {
                field.validations.min_value = Some(1.0);
                field.validations.max_value = Some(5.0);
            }
            _ => {}
        }
    }
    let projection = project(&fields, &[]);

    let short = answers([
        ("email", Value::from("ada@example.com")),
        ("comments", Value::from("hey")),
        ("rating", Value::from(0.0)),
    ]);
    let errors = validate_submission(&fields, &projection, &short).unwrap_err();
    let kinds: Vec<IssueKind> = errors.issues().iter().map(|i| i.kind).collect();
    assert_eq!(kinds, [IssueKind::BelowMinimum, IssueKind::TooShort]);
    assert_eq!(errors.issues()[0].message, "Rating must be at least 1");

    let long = answers([
        ("email", Value::from("ada@example.com")),
        ("comments", Value::from("far too many words")),
        ("rating", Value::from(9.0)),
    ]);
    let errors = validate_submission(&fields, &projection, &long).unwrap_err();
    let kinds: Vec<IssueKind> = errors.issues().iter().map(|i| i.kind).collect();
    assert_eq!(kinds, [IssueKind::AboveMaximum, IssueKind::TooLong]);
}

#[test]
fn test_errors_display_one_line_per_issue() {
    let values = answers([("rating", Value::from(1.0))]);
    let errors = check(&[low_rating_rule()], &values).unwrap_err();

    assert_eq!(
        errors.to_string(),
        "email: Email is required\ncomments: Comments is required"
    );
}

#[test]
fn test_prepare_submission_drops_hidden_fields() {
    let fields = contact_fields();
    let rules = vec![hide_phone_rule(), show_phone_rule()];
    let values = answers([
        ("contactMethod", Value::from("email")),
        ("phone", Value::from("+15550000000")),
        ("email", Value::from("ada@example.com")),
        ("break", Value::from("ignored")),
    ]);
    let projection = project(&fields, &evaluate(&rules, &values));

    let stored = prepare_submission(&fields, &projection, &values);

    assert_eq!(stored.len(), 2);
    assert!(stored.contains_key("contactMethod"));
    assert!(stored.contains_key("email"));
    assert!(!stored.contains_key("phone"));
    assert!(!stored.contains_key("break"));
}

#[test]
fn test_valid_emails() {
    for address in ["ada@example.com", "first.last+tag@mail.example.co.uk"] {
        let values = answers([("email", Value::from(address))]);
        assert!(check(&[], &values).is_ok(), "{}", address);
    }
}

fn fields_with_pattern(pattern: &str) -> Vec<FormField> {
    let mut fields = contact_fields();
    for field in fields.iter_mut().filter(|f| f.id == "phone") {
        field.validations.pattern = Some(pattern.to_string());
    }
    fields
}

#[test]
fn test_pattern_must_match_whole_answer() {
    let fields = fields_with_pattern(r"\+?[0-9]{7,15}");
    let projection = project(&fields, &[]);
    let with_phone = |phone: &str| {
        answers([
            ("email", Value::from("ada@example.com")),
            ("phone", Value::from(phone)),
        ])
    };

    assert!(validate_submission(&fields, &projection, &with_phone("+15550000000")).is_ok());

    for phone in ["call me", "555-0000", "+15550000000 ext 2"] {
        let errors = validate_submission(&fields, &projection, &with_phone(phone)).unwrap_err();
        let issues: Vec<_> = errors.for_field("phone").collect();
        assert_eq!(issues.len(), 1, "{}", phone);
        assert_eq!(issues[0].kind, IssueKind::PatternMismatch);
        assert_eq!(issues[0].message, "Please match the requested format");
    }
}

#[test]
fn test_pattern_skips_unanswered_fields() {
    let fields = fields_with_pattern("[0-9]+");
    let projection = project(&fields, &[]);
    let values = answers([("email", Value::from("ada@example.com"))]);

    assert!(validate_submission(&fields, &projection, &values).is_ok());
}

#[test]
fn test_invalid_pattern_is_not_enforced() {
    let fields = fields_with_pattern("[0-9");
    let projection = project(&fields, &[]);
    let values = answers([
        ("email", Value::from("ada@example.com")),
        ("phone", Value::from("anything")),
    ]);

    assert!(validate_submission(&fields, &projection, &values).is_ok());
}
