use crate::ast::{Answers, RuleTrace};
use crate::form::{CompiledLogic, LogicAction, LogicRule};
use crate::projection::{Projection, SetValuePolicy, project};
use crate::trace::TraceFormatter;
use ahash::AHashSet;

mod engine;

use engine::RuleEngine;

/// The evaluation of one enabled rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub rule_id: String,
    /// True iff the rule fired.
    pub satisfied: bool,
    pub actions: Vec<LogicAction>,
    pub trace: RuleTrace,
}

/// Evaluates every enabled rule against a snapshot of answers.
///
/// Disabled rules are skipped and do not appear in the output. The output
/// keeps the input order. This is a pure function: identical inputs always
/// give identical outputs.
pub fn evaluate(rules: &[LogicRule], values: &Answers) -> Vec<RuleOutcome> {
    rules
        .iter()
        .filter(|rule| rule.enabled)
        .map(|rule| {
            let trace = RuleEngine::new(rule, values).evaluate();
            tracing::trace!(rule = %rule.id, fired = trace.outcome, "evaluated rule");
            RuleOutcome {
                rule_id: rule.id.clone(),
                satisfied: trace.outcome,
                actions: rule.actions.clone(),
                trace,
            }
        })
        .collect()
}

/// Knobs for the evaluator facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluatorOptions {
    pub set_value_policy: SetValuePolicy,
}

/// The result of an evaluation pass.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    /// One outcome per enabled rule, in rule order.
    pub outcomes: Vec<RuleOutcome>,
    pub projection: Projection,
    /// The answers with `setValue` overrides applied per the configured policy.
    pub values: Answers,
    /// A human-readable explanation for every rule that fired.
    pub reasons: Vec<String>,
}

impl EvaluationResult {
    pub fn fired(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.satisfied)
    }
}

/// Runs compiled form logic against answer snapshots.
///
/// An `Evaluator` holds no per-pass state and can be shared across threads.
pub struct Evaluator {
    logic: CompiledLogic,
    options: EvaluatorOptions,
}

impl Evaluator {
    pub fn new(logic: CompiledLogic) -> Self {
        Self::with_options(logic, EvaluatorOptions::default())
    }

    pub fn with_options(logic: CompiledLogic, options: EvaluatorOptions) -> Self {
        Self { logic, options }
    }

    pub fn logic(&self) -> &CompiledLogic {
        &self.logic
    }

    /// Evaluates a snapshot where no field has been edited by the user yet.
    pub fn eval(&self, values: &Answers) -> EvaluationResult {
        self.eval_touched(values, &AHashSet::new())
    }

    /// Evaluates a snapshot; `touched` lists the fields the user has edited.
    pub fn eval_touched(&self, values: &Answers, touched: &AHashSet<String>) -> EvaluationResult {
        let outcomes = evaluate(&self.logic.rules, values);
        let projection = project(&self.logic.fields, &outcomes);
        let values = projection.apply_overrides(values, touched, self.options.set_value_policy);
        let reasons = outcomes
            .iter()
            .filter(|o| o.satisfied)
            .map(|o| TraceFormatter::format_rule(&o.trace))
            .collect();

        EvaluationResult {
            outcomes,
            projection,
            values,
            reasons,
        }
    }
}
