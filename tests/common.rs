//! Common test utilities for building forms, rules and answers.
use formlogic::prelude::*;

/// A contact form with a choice field, a phone field and a rating.
///
/// Fields: `contactMethod` (radio), `phone`, `email` (required), `rating`,
/// `comments`, a page break, then `followUp`.
#[allow(dead_code)]
pub fn contact_fields() -> Vec<FormField> {
    vec![
        FormField::new("contactMethod", FieldKind::Radio, "Contact method")
            .with_options(["email", "phone"]),
        FormField::new("phone", FieldKind::Phone, "Phone"),
        FormField::new("email", FieldKind::Email, "Email").required(true),
        FormField::new("rating", FieldKind::Rating, "Rating"),
        FormField::new("comments", FieldKind::Textarea, "Comments"),
        FormField::new("break", FieldKind::PageBreak, ""),
        FormField::new("followUp", FieldKind::YesNo, "Follow up?"),
    ]
}

/// Rule: show `phone` when `contactMethod` equals "phone".
#[allow(dead_code)]
pub fn show_phone_rule() -> LogicRule {
    LogicRule::new("show-phone", "Show phone if contact method is phone", ConditionType::All)
        .when(LogicCondition::new(
            "contactMethod",
            ConditionOperator::Equals,
            Some(Value::from("phone")),
        ))
        .then(LogicAction::new(ActionKind::Show, "phone"))
}

/// Rule: hide `phone` unless `contactMethod` equals "phone".
#[allow(dead_code)]
pub fn hide_phone_rule() -> LogicRule {
    LogicRule::new("hide-phone", "Hide phone by default", ConditionType::All)
        .when(LogicCondition::new(
            "contactMethod",
            ConditionOperator::NotEquals,
            Some(Value::from("phone")),
        ))
        .then(LogicAction::new(ActionKind::Hide, "phone"))
}

/// Rule: require `comments` when `rating` is less than 3.
#[allow(dead_code)]
pub fn low_rating_rule() -> LogicRule {
    LogicRule::new("low-rating", "Require comments if rating <= 2", ConditionType::All)
        .when(LogicCondition::new(
            "rating",
            ConditionOperator::LessThan,
            Some(Value::from(3.0)),
        ))
        .then(LogicAction::new(ActionKind::Require, "comments"))
}

#[allow(dead_code)]
pub fn contact_form(logic: Vec<LogicRule>) -> FormModel {
    FormModel {
        id: "contact".to_string(),
        name: "Contact".to_string(),
        fields: contact_fields(),
        logic,
        ..Default::default()
    }
}

/// Builds an answer snapshot from `(field, value)` pairs.
#[allow(dead_code)]
pub fn answers<const N: usize>(pairs: [(&str, Value); N]) -> Answers {
    pairs
        .into_iter()
        .map(|(id, value)| (id.to_string(), value))
        .collect()
}

/// A single-condition rule with one action, for operator tests.
#[allow(dead_code)]
pub fn single_rule(
    field_id: &str,
    operator: ConditionOperator,
    value: Option<Value>,
) -> LogicRule {
    LogicRule::new("r", "single", ConditionType::All)
        .when(LogicCondition::new(field_id, operator, value))
        .then(LogicAction::new(ActionKind::Hide, "target"))
}

/// Evaluates a single condition against a single answer.
#[allow(dead_code)]
pub fn condition_holds(operator: ConditionOperator, answer: Value, expected: Option<Value>) -> bool {
    let rules = vec![single_rule("field", operator, expected)];
    let values = answers([("field", answer)]);
    evaluate(&rules, &values)[0].satisfied
}

#[allow(dead_code)]
pub const CONTACT_FORM_JSON: &str = r#"{
    "id": "contact",
    "name": "Contact form",
    "fields": [
        { "id": "contactMethod", "type": "radio", "label": "Contact method",
          "options": [{ "label": "Email", "value": "email" }, { "label": "Phone", "value": "phone" }] },
        { "id": "phone", "kind": "phone", "label": "Phone" },
        { "id": "email", "type": "email", "label": "Email", "required": true },
        { "id": "rating", "type": "rating", "label": "Rating", "validations": { "minValue": 1, "maxValue": 5 } },
        { "id": "comments", "type": "textarea", "title": "Comments" },
        { "label": "orphan without id", "type": "text" }
    ],
    "logic": [
        {
            "id": "hide-phone",
            "name": "Hide phone by default",
            "enabled": true,
            "conditionType": "all",
            "conditions": [{ "id": "c1", "fieldId": "contactMethod", "operator": "notEquals", "value": "phone" }],
            "actions": [{ "id": "a1", "type": "hide", "targetFieldId": "phone" }]
        },
        {
            "id": "low-rating",
            "name": "Require comments if rating <= 2",
            "conditionType": "any",
            "conditions": [{ "fieldId": "rating", "operator": "lessThan", "value": 3 }],
            "actions": [{ "type": "require", "fieldId": "comments" }]
        },
        { "id": "broken", "name": "No arrays at all" },
        {
            "id": "weird-operator",
            "conditions": [{ "fieldId": "rating", "operator": "matchesRegex", "value": ".*" }],
            "actions": [{ "type": "hide", "targetFieldId": "email" }]
        },
        {
            "id": "weird-action",
            "conditions": [{ "fieldId": "rating", "operator": "isAnswered" }],
            "actions": [{ "type": "explode", "targetFieldId": "email" }, { "type": "show", "targetFieldId": "email" }]
        }
    ],
    "settings": { "locale": "en" }
}"#;
