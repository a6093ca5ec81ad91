use super::definition::FormField;
use super::logic::{ActionKind, ConditionOperator, LogicRule};
use itertools::Itertools;

/// The ordered rule collection of a form.
///
/// Order matters: rules are evaluated front to back and later rules win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleStore {
    rules: Vec<LogicRule>,
}

/// A human-readable "IF ... THEN ..." rendering of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSummary {
    pub conditions: String,
    pub actions: String,
}

impl RuleStore {
    pub fn new(rules: Vec<LogicRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[LogicRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<LogicRule> {
        self.rules
    }

    pub fn get(&self, rule_id: &str) -> Option<&LogicRule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }

    /// Replaces the rule with the same id in place, or appends it.
    pub fn upsert(&mut self, rule: LogicRule) {
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn remove(&mut self, rule_id: &str) -> Option<LogicRule> {
        let index = self.rules.iter().position(|r| r.id == rule_id)?;
        Some(self.rules.remove(index))
    }

    /// Returns false when no rule has the given id.
    pub fn set_enabled(&mut self, rule_id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.id == rule_id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn summarize(rule: &LogicRule, fields: &[FormField]) -> RuleSummary {
        let label = |id: &str| {
            fields
                .iter()
                .find(|f| f.id == id)
                .map_or("Unknown field", |f| f.label.as_str())
                .to_string()
        };

        let conditions = rule
            .conditions
            .iter()
            .map(|c| {
                let name = label(&c.field_id);
                match c.operator {
                    ConditionOperator::IsAnswered => format!("{} is answered", name),
                    ConditionOperator::IsNotAnswered => format!("{} is not answered", name),
                    op => {
                        let value = c.value.as_ref().map(|v| v.to_string()).unwrap_or_default();
                        format!("{} {} {}", name, op, value)
                    }
                }
            })
            .join(&format!(" {} ", rule.condition_type.joiner()));

        let actions = rule
            .actions
            .iter()
            .map(|a| {
                let name = label(&a.target_field_id);
                match a.kind {
                    ActionKind::Show => format!("Show {}", name),
                    ActionKind::Hide => format!("Hide {}", name),
                    ActionKind::Require => format!("Make {} required", name),
                    ActionKind::Unrequire => format!("Make {} optional", name),
                    ActionKind::SetValue => {
                        let value = a.value.as_ref().map(|v| v.to_string()).unwrap_or_default();
                        format!("Set {} to \"{}\"", name, value)
                    }
                    ActionKind::JumpTo => format!("Jump to {}", name),
                }
            })
            .join(", ");

        RuleSummary {
            conditions,
            actions,
        }
    }
}

impl From<Vec<LogicRule>> for RuleStore {
    fn from(rules: Vec<LogicRule>) -> Self {
        Self::new(rules)
    }
}
