use super::Value;
use crate::form::{ConditionOperator, ConditionType};

/// A record of how a single condition was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionTrace {
    pub field_id: String,
    pub operator: ConditionOperator,
    /// The answer the condition saw (`Null` when the field had no answer).
    pub observed: Value,
    /// The comparison value from the condition, if the operator takes one.
    pub expected: Option<Value>,
    pub outcome: bool,
}

/// A record of how a rule's condition group was evaluated.
///
/// Conditions after the deciding one are not evaluated and do not appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTrace {
    pub rule_id: String,
    pub rule_name: String,
    pub condition_type: ConditionType,
    pub conditions: Vec<ConditionTrace>,
    pub outcome: bool,
}

impl RuleTrace {
    /// The conditions that decided the outcome: the satisfied ones when the
    /// rule fired, the failed ones otherwise.
    pub fn deciding_conditions(&self) -> impl Iterator<Item = &ConditionTrace> {
        self.conditions
            .iter()
            .filter(move |c| c.outcome == self.outcome)
    }
}
