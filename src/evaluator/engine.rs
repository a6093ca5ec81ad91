use crate::ast::{Answers, ConditionTrace, RuleTrace, Value};
use crate::form::{ConditionOperator, ConditionType, LogicCondition, LogicRule};

static NULL: Value = Value::Null;

/// Evaluates the condition group of a single rule against one answer snapshot.
pub(super) struct RuleEngine<'a> {
    rule: &'a LogicRule,
    values: &'a Answers,
}

impl<'a> RuleEngine<'a> {
    pub(super) fn new(rule: &'a LogicRule, values: &'a Answers) -> Self {
        Self { rule, values }
    }

    /// Combines the conditions per the rule's condition type, stopping at the
    /// first deciding condition. A rule without conditions never fires.
    pub(super) fn evaluate(&self) -> RuleTrace {
        let mut conditions = Vec::with_capacity(self.rule.conditions.len());
        let mut outcome = !self.rule.conditions.is_empty();

        for condition in &self.rule.conditions {
            let trace = self.evaluate_condition(condition);
            let result = trace.outcome;
            conditions.push(trace);
            match (self.rule.condition_type, result) {
                (ConditionType::All, false) => {
                    outcome = false;
                    break;
                }
                (ConditionType::Any, true) => {
                    outcome = true;
                    break;
                }
                (ConditionType::Any, false) => outcome = false,
                (ConditionType::All, true) => {}
            }
        }

        RuleTrace {
            rule_id: self.rule.id.clone(),
            rule_name: self.rule.name.clone(),
            condition_type: self.rule.condition_type,
            conditions,
            outcome,
        }
    }

    fn evaluate_condition(&self, condition: &LogicCondition) -> ConditionTrace {
        let observed = self.values.get(&condition.field_id).unwrap_or(&NULL);
        let expected = condition.value.as_ref().unwrap_or(&NULL);

        let outcome = match condition.operator {
            ConditionOperator::Equals => self.equals(observed, expected),
            ConditionOperator::NotEquals => !self.equals(observed, expected),
            ConditionOperator::Contains => self.contains(observed, expected),
            ConditionOperator::NotContains => !self.contains(observed, expected),
            ConditionOperator::GreaterThan => self.compare(observed, expected, |a, b| a > b),
            ConditionOperator::LessThan => self.compare(observed, expected, |a, b| a < b),
            ConditionOperator::IsAnswered => observed.is_answered(),
            ConditionOperator::IsNotAnswered => !observed.is_answered(),
        };

        ConditionTrace {
            field_id: condition.field_id.clone(),
            operator: condition.operator,
            observed: observed.clone(),
            expected: condition.operator.takes_value().then(|| expected.clone()),
            outcome,
        }
    }

    /// Exact match for sequence answers; a scalar matches a one-element sequence.
    fn equals(&self, observed: &Value, expected: &Value) -> bool {
        match (observed, expected) {
            (Value::List(_), Value::List(_)) => observed.loose_eq(expected),
            (Value::List(items), scalar) => items.len() == 1 && items[0].loose_eq(scalar),
            _ => observed.loose_eq(expected),
        }
    }

    /// Substring test for scalars, element membership for sequences.
    /// An empty needle is never contained.
    fn contains(&self, observed: &Value, expected: &Value) -> bool {
        if !expected.is_answered() {
            return false;
        }
        match observed {
            Value::Null => false,
            Value::List(items) => match expected {
                Value::List(needles) => needles
                    .iter()
                    .all(|n| items.iter().any(|i| i.loose_eq(n))),
                needle => items.iter().any(|i| i.loose_eq(needle)),
            },
            scalar => scalar.to_string().contains(&expected.to_string()),
        }
    }

    /// Numeric comparison; any non-numeric side makes the condition false.
    fn compare(&self, observed: &Value, expected: &Value, op: fn(f64, f64) -> bool) -> bool {
        match (observed.as_number(), expected.as_number()) {
            (Some(a), Some(b)) => op(a, b),
            _ => false,
        }
    }
}
