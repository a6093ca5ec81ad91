//! Resolves the effects of fired rules into per-field state.
//!
//! A projection starts from each field's static defaults and applies the
//! actions of every satisfied rule in order, so later actions overwrite
//! earlier ones for the same field and attribute.

use crate::ast::{Answers, Value};
use crate::evaluator::RuleOutcome;
use crate::form::{ActionKind, FormField, definition::page_of};
use ahash::{AHashMap, AHashSet};

/// The rule-applied state of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProjection {
    pub visible: bool,
    pub required: bool,
    /// A value pushed by a `setValue` action. See [`SetValuePolicy`].
    pub value: Option<Value>,
}

impl FieldProjection {
    fn defaults(field: &FormField) -> Self {
        Self {
            visible: true,
            required: field.required,
            value: None,
        }
    }
}

/// Where navigation should go next in a paginated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTarget {
    pub field_id: String,
    /// Zero-based page holding the field; pages are split by `page_break` fields.
    pub page: usize,
}

/// Whether `setValue` overrides may replace answers the user typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetValuePolicy {
    /// Only fields the user has not edited yet receive the override.
    #[default]
    UntouchedOnly,
    /// The override always replaces the current answer.
    Always,
}

/// The per-field overlay produced by one evaluation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    fields: AHashMap<String, FieldProjection>,
    jump_to: Option<JumpTarget>,
}

impl Projection {
    pub fn field(&self, field_id: &str) -> Option<&FieldProjection> {
        self.fields.get(field_id)
    }

    pub fn fields(&self) -> &AHashMap<String, FieldProjection> {
        &self.fields
    }

    /// Unknown fields read as visible.
    pub fn is_visible(&self, field_id: &str) -> bool {
        self.fields.get(field_id).is_none_or(|p| p.visible)
    }

    pub fn is_required(&self, field_id: &str) -> bool {
        self.fields.get(field_id).is_some_and(|p| p.required)
    }

    pub fn jump_to(&self) -> Option<&JumpTarget> {
        self.jump_to.as_ref()
    }

    /// Returns a copy of `values` with `setValue` overrides applied per `policy`.
    ///
    /// `touched` holds the ids of fields the user has edited.
    pub fn apply_overrides(
        &self,
        values: &Answers,
        touched: &AHashSet<String>,
        policy: SetValuePolicy,
    ) -> Answers {
        let mut resolved = values.clone();
        for (field_id, projection) in &self.fields {
            let Some(value) = &projection.value else {
                continue;
            };
            if policy == SetValuePolicy::UntouchedOnly && touched.contains(field_id) {
                continue;
            }
            resolved.insert(field_id.clone(), value.clone());
        }
        resolved
    }
}

/// Applies the actions of satisfied outcomes on top of the fields' defaults.
///
/// Actions targeting a field that is not in `fields` are skipped.
pub fn project(fields: &[FormField], outcomes: &[RuleOutcome]) -> Projection {
    let mut projected: AHashMap<String, FieldProjection> = fields
        .iter()
        .map(|f| (f.id.clone(), FieldProjection::defaults(f)))
        .collect();
    let mut jump_to = None;

    for outcome in outcomes.iter().filter(|o| o.satisfied) {
        for action in &outcome.actions {
            let Some(target) = projected.get_mut(&action.target_field_id) else {
                tracing::debug!(
                    rule = %outcome.rule_id,
                    target = %action.target_field_id,
                    action = %action.kind,
                    "skipping action on unknown field"
                );
                continue;
            };
            match action.kind {
                ActionKind::Show => target.visible = true,
                ActionKind::Hide => target.visible = false,
                ActionKind::Require => target.required = true,
                ActionKind::Unrequire => target.required = false,
                ActionKind::SetValue => match &action.value {
                    Some(value) => target.value = Some(value.clone()),
                    None => tracing::debug!(
                        rule = %outcome.rule_id,
                        target = %action.target_field_id,
                        "skipping setValue without a value"
                    ),
                },
                ActionKind::JumpTo => {
                    jump_to = page_of(fields, &action.target_field_id).map(|page| JumpTarget {
                        field_id: action.target_field_id.clone(),
                        page,
                    });
                }
            }
        }
    }

    Projection {
        fields: projected,
        jump_to,
    }
}
