use crate::ast::{ConditionTrace, RuleTrace, Value};
use crate::form::ConditionOperator;
use itertools::Itertools;

/// Formats evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a rule trace as `name: condition AND condition`.
    ///
    /// Only the deciding conditions are shown: for a fired `any` rule that is
    /// the satisfied condition, for a failed `all` rule the failing one.
    pub fn format_rule(trace: &RuleTrace) -> String {
        let conditions = trace
            .deciding_conditions()
            .map(Self::format_condition)
            .join(&format!(" {} ", trace.condition_type.joiner()));

        let name = if trace.rule_name.is_empty() {
            &trace.rule_id
        } else {
            &trace.rule_name
        };

        if conditions.is_empty() {
            format!("{}: no conditions", name)
        } else {
            format!("{}: {}", name, conditions)
        }
    }

    /// Format a single condition, e.g. `$rating (was 1) lessThan 3`.
    pub fn format_condition(trace: &ConditionTrace) -> String {
        let observed = Self::format_value(&trace.observed);
        match trace.operator {
            ConditionOperator::IsAnswered => {
                format!("${} (was {}) is answered", trace.field_id, observed)
            }
            ConditionOperator::IsNotAnswered => {
                format!("${} (was {}) is not answered", trace.field_id, observed)
            }
            op => format!(
                "${} (was {}) {} {}",
                trace.field_id,
                observed,
                op,
                trace
                    .expected
                    .as_ref()
                    .map_or_else(|| "null".to_string(), Self::format_value)
            ),
        }
    }

    /// Format a value for display. Text is quoted so empty answers stay visible.
    fn format_value(value: &Value) -> String {
        match value {
            Value::Text(s) => format!("\"{}\"", s),
            Value::List(items) => format!("[{}]", items.iter().map(Self::format_value).join(", ")),
            other => other.to_string(),
        }
    }
}
