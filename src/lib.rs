//! # formlogic - Conditional Logic Engine for Form Builders
//!
//! **formlogic** evaluates the IF/THEN rules a form author attaches to a form
//! and resolves them into the state a renderer needs: which fields are
//! visible, which are required, which values logic pushes into fields, and
//! where navigation should jump next.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Form**: Parse the form JSON (fields plus `logic` rules). [`form::RawForm`]
//!     reads the builder's JSON shape leniently; implement [`form::IntoForm`] for your own format.
//! 2.  **Compile**: `Compiler::builder(form).build().compile()` validates field and rule ids and
//!     normalizes the rules, reporting dangling references as diagnostics.
//! 3.  **Evaluate**: an [`Evaluator`] runs the compiled logic against an answer snapshot on every
//!     change and returns the fired rules, the [`projection::Projection`] and the resolved answers.
//! 4.  **Validate**: [`validation::validate_submission`] checks required fields against the
//!     projection, so hidden fields never block a submission.
//!
//! The two building blocks are also available as pure functions:
//! [`evaluator::evaluate`] and [`projection::project`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formlogic::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let form = FormModel {
//!         fields: vec![
//!             FormField::new("contactMethod", FieldKind::Radio, "Contact method")
//!                 .with_options(["email", "phone"]),
//!             FormField::new("phone", FieldKind::Phone, "Phone"),
//!         ],
//!         logic: vec![
//!             LogicRule::new("r1", "Hide phone unless requested", ConditionType::All)
//!                 .when(LogicCondition::new(
//!                     "contactMethod",
//!                     ConditionOperator::NotEquals,
//!                     Some(Value::from("phone")),
//!                 ))
//!                 .then(LogicAction::new(ActionKind::Hide, "phone")),
//!         ],
//!         ..Default::default()
//!     };
//!
//!     let compiled = Compiler::builder(form).build().compile()?;
//!     let evaluator = Evaluator::new(compiled);
//!
//!     let mut answers = Answers::new();
//!     answers.insert("contactMethod".to_string(), Value::from("email"));
//!
//!     let result = evaluator.eval(&answers);
//!     assert!(!result.projection.is_visible("phone"));
//!     for reason in &result.reasons {
//!         println!("-> {}", reason);
//!     }
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod compiler;
pub mod data;
pub mod error;
pub mod evaluator;
pub mod form;
pub mod prelude;
pub mod projection;
pub mod trace;
pub mod validation;
