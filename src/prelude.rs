//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the formlogic crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use formlogic::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let form_json = std::fs::read_to_string("path/to/form.json")?;
//! let form = RawForm::from_json(&form_json)?.into_form()?;
//!
//! let compiled = Compiler::builder(form).build().compile()?;
//! let evaluator = Evaluator::new(compiled);
//!
//! let answers = SampleAnswers::from_file("path/to/answers.json")?;
//! let result = evaluator.eval_touched(answers.values(), &answers.touched());
//! println!("Jump target: {:?}", result.projection.jump_to());
//! # Ok(())
//! # }
//! ```

// Core compilation and evaluation
pub use crate::compiler::{Compiler, Diagnostic};
pub use crate::evaluator::{EvaluationResult, Evaluator, EvaluatorOptions, RuleOutcome, evaluate};
pub use crate::projection::{FieldProjection, JumpTarget, Projection, SetValuePolicy, project};
pub use crate::validation::{prepare_submission, validate_submission};

// Values and traces
pub use crate::ast::{Answers, ConditionTrace, RuleTrace, Value};

// Form model
pub use crate::form::{
    ActionKind, CompiledLogic, ConditionOperator, ConditionType, FieldKind, FormExport, FormField,
    FormModel, IntoForm, LogicAction, LogicCondition, LogicRule, RawForm, RuleStore,
};

// Data structures
pub use crate::data::SampleAnswers;

// Error types
pub use crate::error::{ArtifactError, CompileError, ImportError};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
