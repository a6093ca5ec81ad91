use super::definition::{FieldKind, FieldValidation, FormField, FormModel};
use super::logic::{
    ActionKind, ConditionOperator, ConditionType, LogicAction, LogicCondition, LogicRule,
};
use crate::ast::Value;
use crate::error::ImportError;
use serde::Deserialize;

/// A trait for custom data models that can be converted into a `FormModel`.
///
/// Implement this on your own storage or wire structs to hand them to the
/// compiler. [`RawForm`] is the implementation for the builder's JSON shape.
pub trait IntoForm {
    /// Consumes the object and converts it into a form definition.
    fn into_form(self) -> Result<FormModel, ImportError>;
}

impl IntoForm for FormModel {
    fn into_form(self) -> Result<FormModel, ImportError> {
        Ok(self)
    }
}

/// The form builder's JSON document, read leniently.
///
/// Everything except the `fields` array may be missing or malformed; malformed
/// rules degrade to rules that never fire instead of failing the import.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawForm {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fields: Option<Vec<RawField>>,
    #[serde(default)]
    logic: Option<Vec<RawRule>>,
    #[serde(default)]
    settings: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "kind")]
    r#type: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    options: Option<Vec<RawOption>>,
    #[serde(default)]
    default_value: Option<serde_json::Value>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    validations: Option<RawValidation>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Labeled {
        label: String,
        #[serde(default)]
        value: Option<String>,
    },
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct RawValidation {
    #[serde(default)]
    required: Option<bool>,
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    max_length: Option<usize>,
    #[serde(default)]
    min_value: Option<f64>,
    #[serde(default)]
    max_value: Option<f64>,
    #[serde(default)]
    pattern: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    condition_type: Option<String>,
    #[serde(default)]
    conditions: Option<Vec<RawCondition>>,
    #[serde(default)]
    actions: Option<Vec<RawAction>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawCondition {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    field_id: Option<String>,
    #[serde(default)]
    operator: Option<String>,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawAction {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    target_field_id: Option<String>,
    #[serde(default)]
    field_id: Option<String>,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

impl RawForm {
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        serde_json::from_str(json).map_err(|e| ImportError::JsonParseError(e.to_string()))
    }
}

impl IntoForm for RawForm {
    fn into_form(self) -> Result<FormModel, ImportError> {
        let raw_fields = self.fields.ok_or(ImportError::MissingFields)?;

        let fields = raw_fields
            .into_iter()
            .filter_map(convert_field)
            .collect();

        let logic = self
            .logic
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| convert_rule(index, raw))
            .collect();

        Ok(FormModel {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_else(|| "Imported Form".to_string()),
            description: self.description.unwrap_or_default(),
            fields,
            logic,
            settings: self.settings.unwrap_or(serde_json::Value::Null),
        })
    }
}

fn convert_field(raw: RawField) -> Option<FormField> {
    let Some(id) = raw.id.filter(|id| !id.is_empty()) else {
        tracing::warn!(label = ?raw.label, "skipping field without an id");
        return None;
    };

    let validation = raw.validations.unwrap_or_default();
    let options = raw
        .options
        .unwrap_or_default()
        .into_iter()
        .map(|option| match option {
            RawOption::Plain(value) => value,
            RawOption::Labeled { label, value } => value.unwrap_or(label),
        })
        .collect();

    Some(FormField {
        kind: FieldKind::from(raw.r#type.unwrap_or_else(|| "text".to_string())),
        label: raw.label.or(raw.title).unwrap_or_else(|| id.clone()),
        required: raw.required.or(validation.required).unwrap_or(false),
        options,
        default_value: raw.default_value.map(Value::from),
        placeholder: raw.placeholder,
        validations: FieldValidation {
            min_length: validation.min_length,
            max_length: validation.max_length,
            min_value: validation.min_value,
            max_value: validation.max_value,
            pattern: validation.pattern.filter(|p| !p.is_empty()),
        },
        id,
    })
}

fn convert_rule(index: usize, raw: RawRule) -> LogicRule {
    let id = raw.id.unwrap_or_else(|| format!("rule-{}", index + 1));
    let mut malformed = false;

    let condition_type = match raw.condition_type.as_deref() {
        None | Some("all") => ConditionType::All,
        Some("any") => ConditionType::Any,
        Some(other) => {
            tracing::warn!(rule = %id, condition_type = other, "unknown condition type; rule disabled");
            malformed = true;
            ConditionType::All
        }
    };

    let mut conditions = Vec::new();
    for raw_condition in raw.conditions.unwrap_or_default() {
        let operator = raw_condition
            .operator
            .as_deref()
            .unwrap_or("equals")
            .parse::<ConditionOperator>();
        match (raw_condition.field_id, operator) {
            (Some(field_id), Ok(operator)) => conditions.push(LogicCondition {
                id: raw_condition.id.unwrap_or_default(),
                field_id,
                operator,
                value: raw_condition.value.map(Value::from),
            }),
            (field_id, operator) => {
                tracing::warn!(
                    rule = %id,
                    field = ?field_id,
                    operator = ?operator.err(),
                    "malformed condition; rule disabled"
                );
                malformed = true;
            }
        }
    }

    let mut actions = Vec::new();
    for raw_action in raw.actions.unwrap_or_default() {
        let target = raw_action.target_field_id.or(raw_action.field_id);
        let kind = raw_action.r#type.as_deref().map(str::parse::<ActionKind>);
        match (target, kind) {
            (Some(target_field_id), Some(Ok(kind))) => actions.push(LogicAction {
                id: raw_action.id.unwrap_or_default(),
                kind,
                target_field_id,
                value: raw_action.value.map(Value::from),
            }),
            (target, kind) => {
                tracing::warn!(rule = %id, target = ?target, kind = ?kind, "dropping malformed action");
            }
        }
    }

    LogicRule {
        name: raw.name.unwrap_or_default(),
        enabled: raw.enabled.unwrap_or(true) && !malformed,
        condition_type,
        conditions,
        actions,
        id,
    }
}
