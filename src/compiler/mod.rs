use crate::error::{CompileError, ImportError};
use crate::form::{ActionKind, CompiledLogic, FormField, FormModel, IntoForm, LogicRule};
use crate::validation::compile_pattern;
use ahash::{AHashMap, AHashSet};

mod diagnostics;

pub use diagnostics::Diagnostic;

/// Validates and normalizes a form's rule store into a `CompiledLogic` snapshot.
pub struct Compiler {
    form: FormModel,
    strict_references: bool,
}

pub struct CompilerBuilder {
    form: FormModel,
    strict_references: bool,
}

impl CompilerBuilder {
    pub fn new(form: FormModel) -> Self {
        Self {
            form,
            strict_references: false,
        }
    }

    /// Turn dangling field references into hard errors instead of diagnostics.
    pub fn strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            form: self.form,
            strict_references: self.strict_references,
        }
    }
}

impl Compiler {
    pub fn builder(form: FormModel) -> CompilerBuilder {
        CompilerBuilder::new(form)
    }

    /// Converts a user format and returns a builder for it.
    pub fn from_source(source: impl IntoForm) -> Result<CompilerBuilder, ImportError> {
        Ok(CompilerBuilder::new(source.into_form()?))
    }

    pub fn compile(self) -> Result<CompiledLogic, CompileError> {
        let field_index = index_fields(&self.form.fields)?;

        let mut seen_rules = AHashSet::new();
        let mut diagnostics = check_patterns(&self.form.fields);
        let mut rules = Vec::with_capacity(self.form.logic.len());

        for rule in self.form.logic {
            if !seen_rules.insert(rule.id.clone()) {
                return Err(CompileError::DuplicateRuleId(rule.id));
            }
            let rule =
                normalize_rule(rule, &field_index, self.strict_references, &mut diagnostics)?;
            rules.push(rule);
        }

        for diagnostic in &diagnostics {
            tracing::warn!(rule = diagnostic.rule_id(), "{}", diagnostic);
        }
        tracing::debug!(
            fields = self.form.fields.len(),
            rules = rules.len(),
            diagnostics = diagnostics.len(),
            "compiled form logic"
        );

        Ok(CompiledLogic {
            fields: self.form.fields,
            rules,
            field_index,
            diagnostics,
        })
    }
}

fn index_fields(fields: &[FormField]) -> Result<AHashMap<String, usize>, CompileError> {
    let mut index = AHashMap::with_capacity(fields.len());
    for (position, field) in fields.iter().enumerate() {
        if index.insert(field.id.clone(), position).is_some() {
            return Err(CompileError::DuplicateFieldId(field.id.clone()));
        }
    }
    Ok(index)
}

/// Field patterns are user-authored regexes; a bad one is reported and ignored at submit time.
fn check_patterns(fields: &[FormField]) -> Vec<Diagnostic> {
    fields
        .iter()
        .filter_map(|field| {
            let pattern = field.validations.pattern.as_ref()?;
            let error = compile_pattern(pattern).err()?;
            Some(Diagnostic::InvalidPattern {
                field_id: field.id.clone(),
                pattern: pattern.clone(),
                message: error.to_string(),
            })
        })
        .collect()
}

fn normalize_rule(
    mut rule: LogicRule,
    field_index: &AHashMap<String, usize>,
    strict: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<LogicRule, CompileError> {
    let dangling = |field_id: &str| -> Result<bool, CompileError> {
        if field_index.contains_key(field_id) {
            Ok(false)
        } else if strict {
            Err(CompileError::DanglingReference {
                rule_id: rule.id.clone(),
                field_id: field_id.to_string(),
            })
        } else {
            Ok(true)
        }
    };

    let mut conditions = Vec::with_capacity(rule.conditions.len());
    for condition in std::mem::take(&mut rule.conditions) {
        if dangling(&condition.field_id)? {
            diagnostics.push(Diagnostic::DanglingCondition {
                rule_id: rule.id.clone(),
                field_id: condition.field_id,
            });
            continue;
        }
        conditions.push(condition);
    }
    if conditions.is_empty() {
        diagnostics.push(Diagnostic::EmptyConditions {
            rule_id: rule.id.clone(),
        });
    }
    rule.conditions = conditions;

    let mut actions = Vec::with_capacity(rule.actions.len());
    for action in std::mem::take(&mut rule.actions) {
        if dangling(&action.target_field_id)? {
            diagnostics.push(Diagnostic::DanglingAction {
                rule_id: rule.id.clone(),
                field_id: action.target_field_id,
            });
            continue;
        }
        if action.kind == ActionKind::SetValue && action.value.is_none() {
            diagnostics.push(Diagnostic::MissingSetValue {
                rule_id: rule.id.clone(),
                field_id: action.target_field_id,
            });
            continue;
        }
        actions.push(action);
    }
    if actions.is_empty() {
        diagnostics.push(Diagnostic::EmptyActions {
            rule_id: rule.id.clone(),
        });
    }
    rule.actions = actions;

    Ok(rule)
}
