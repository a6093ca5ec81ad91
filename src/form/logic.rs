use crate::ast::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a condition compares a field's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    IsAnswered,
    IsNotAnswered,
}

impl ConditionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "notEquals",
            ConditionOperator::Contains => "contains",
            ConditionOperator::NotContains => "notContains",
            ConditionOperator::GreaterThan => "greaterThan",
            ConditionOperator::LessThan => "lessThan",
            ConditionOperator::IsAnswered => "isAnswered",
            ConditionOperator::IsNotAnswered => "isNotAnswered",
        }
    }

    /// Whether the operator compares against a value from the condition.
    pub fn takes_value(&self) -> bool {
        !matches!(
            self,
            ConditionOperator::IsAnswered | ConditionOperator::IsNotAnswered
        )
    }
}

impl FromStr for ConditionOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(ConditionOperator::Equals),
            "notEquals" => Ok(ConditionOperator::NotEquals),
            "contains" => Ok(ConditionOperator::Contains),
            "notContains" => Ok(ConditionOperator::NotContains),
            "greaterThan" => Ok(ConditionOperator::GreaterThan),
            "lessThan" => Ok(ConditionOperator::LessThan),
            "isAnswered" => Ok(ConditionOperator::IsAnswered),
            "isNotAnswered" => Ok(ConditionOperator::IsNotAnswered),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a fired rule does to its target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Show,
    Hide,
    Require,
    Unrequire,
    SetValue,
    JumpTo,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Show => "show",
            ActionKind::Hide => "hide",
            ActionKind::Require => "require",
            ActionKind::Unrequire => "unrequire",
            ActionKind::SetValue => "setValue",
            ActionKind::JumpTo => "jumpTo",
        }
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show" => Ok(ActionKind::Show),
            "hide" => Ok(ActionKind::Hide),
            "require" => Ok(ActionKind::Require),
            "unrequire" => Ok(ActionKind::Unrequire),
            "setValue" => Ok(ActionKind::SetValue),
            "jumpTo" => Ok(ActionKind::JumpTo),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule combines its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionType {
    #[default]
    All,
    Any,
}

impl ConditionType {
    pub fn joiner(&self) -> &'static str {
        match self {
            ConditionType::All => "AND",
            ConditionType::Any => "OR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicCondition {
    #[serde(default)]
    pub id: String,
    pub field_id: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: Option<Value>,
}

impl LogicCondition {
    pub fn new(field_id: &str, operator: ConditionOperator, value: Option<Value>) -> Self {
        Self {
            id: String::new(),
            field_id: field_id.to_string(),
            operator,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicAction {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(alias = "fieldId")]
    pub target_field_id: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl LogicAction {
    pub fn new(kind: ActionKind, target_field_id: &str) -> Self {
        Self {
            id: String::new(),
            kind,
            target_field_id: target_field_id.to_string(),
            value: None,
        }
    }

    pub fn set_value(target_field_id: &str, value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(ActionKind::SetValue, target_field_id)
        }
    }
}

/// A named, enable-able IF/THEN unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub condition_type: ConditionType,
    #[serde(default)]
    pub conditions: Vec<LogicCondition>,
    #[serde(default)]
    pub actions: Vec<LogicAction>,
}

fn enabled_by_default() -> bool {
    true
}

impl LogicRule {
    pub fn new(id: &str, name: &str, condition_type: ConditionType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            enabled: true,
            condition_type,
            conditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn when(mut self, condition: LogicCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn then(mut self, action: LogicAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
