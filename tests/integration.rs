//! End-to-end tests: import, compile, evaluate and persist compiled logic.
mod common;
use ahash::AHashSet;
use common::*;
use formlogic::prelude::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_evaluator_can_be_shared_across_threads() {
    assert_send_sync::<Evaluator>();
    assert_send_sync::<CompiledLogic>();

    let evaluator = std::sync::Arc::new(contact_evaluator());
    let handles: Vec<_> = [1.0, 4.0]
        .into_iter()
        .map(|rating| {
            let evaluator = std::sync::Arc::clone(&evaluator);
            std::thread::spawn(move || {
                evaluator
                    .eval(&answers([("rating", Value::from(rating))]))
                    .projection
                    .is_required("comments")
            })
        })
        .collect();
    let required: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(required, [true, false]);
}

fn contact_evaluator() -> Evaluator {
    let compiled = Compiler::from_source(RawForm::from_json(CONTACT_FORM_JSON).unwrap())
        .unwrap()
        .build()
        .compile()
        .unwrap();
    Evaluator::new(compiled)
}

#[test]
fn test_imported_form_end_to_end() {
    let evaluator = contact_evaluator();

    let result = evaluator.eval(&answers([
        ("contactMethod", Value::from("email")),
        ("rating", Value::from(2.0)),
    ]));

    assert!(!result.projection.is_visible("phone"));
    assert!(result.projection.is_required("comments"));
    assert!(result.projection.is_visible("email"));

    let fired: Vec<&str> = result.fired().map(|o| o.rule_id.as_str()).collect();
    // "broken" has no conditions and never fires.
    assert_eq!(fired, ["hide-phone", "low-rating", "weird-action"]);
    // The rule with an unknown operator was disabled on import.
    assert!(result.outcomes.iter().all(|o| o.rule_id != "weird-operator"));
}

#[test]
fn test_reasons_explain_fired_rules() {
    let evaluator = contact_evaluator();
    let result = evaluator.eval(&answers([
        ("contactMethod", Value::from("phone")),
        ("rating", Value::from(1.0)),
    ]));

    assert_eq!(
        result.reasons,
        [
            "Require comments if rating <= 2: $rating (was 1) lessThan 3",
            "weird-action: $rating (was 1) is answered",
        ]
    );
}

#[test]
fn test_evaluator_applies_set_value_policy() {
    let rule = LogicRule::new("prefill", "prefill", ConditionType::All)
        .when(LogicCondition::new(
            "contactMethod",
            ConditionOperator::Equals,
            Some(Value::from("phone")),
        ))
        .then(LogicAction::set_value("comments", "Call me"));
    let compiled = Compiler::builder(contact_form(vec![rule])).build().compile().unwrap();

    let values = answers([
        ("contactMethod", Value::from("phone")),
        ("comments", Value::from("typed")),
    ]);
    let touched: AHashSet<String> = ["comments".to_string()].into_iter().collect();

    let default = Evaluator::new(compiled.clone()).eval_touched(&values, &touched);
    assert_eq!(default.values.get("comments"), Some(&Value::from("typed")));

    let untouched = Evaluator::new(compiled.clone()).eval(&values);
    assert_eq!(untouched.values.get("comments"), Some(&Value::from("Call me")));

    let always = Evaluator::with_options(
        compiled,
        EvaluatorOptions {
            set_value_policy: SetValuePolicy::Always,
        },
    )
    .eval_touched(&values, &touched);
    assert_eq!(always.values.get("comments"), Some(&Value::from("Call me")));
}

#[test]
fn test_overrides_are_not_fed_back_into_the_same_pass() {
    let set = LogicRule::new("set", "set", ConditionType::All)
        .when(LogicCondition::new("rating", ConditionOperator::IsAnswered, None))
        .then(LogicAction::set_value("contactMethod", "phone"));
    let show = show_phone_rule();
    let hide = hide_phone_rule();
    let compiled = Compiler::builder(contact_form(vec![hide, set, show]))
        .build()
        .compile()
        .unwrap();
    let evaluator = Evaluator::new(compiled);

    let first = evaluator.eval(&answers([("rating", Value::from(5.0))]));
    assert_eq!(first.values.get("contactMethod"), Some(&Value::from("phone")));
    assert!(!first.projection.is_visible("phone"));

    // The next pass sees the overridden answer.
    let second = evaluator.eval(&first.values);
    assert!(second.projection.is_visible("phone"));
}

#[test]
fn test_compiled_logic_bytes_round_trip() {
    let compiled = Compiler::from_source(RawForm::from_json(CONTACT_FORM_JSON).unwrap())
        .unwrap()
        .build()
        .compile()
        .unwrap();

    let bytes = compiled.to_bytes().unwrap();
    let restored = CompiledLogic::from_bytes(&bytes).unwrap();
    assert_eq!(restored, compiled);

    let values = answers([("rating", Value::from(1.0))]);
    assert_eq!(
        Evaluator::new(restored).eval(&values).projection,
        Evaluator::new(compiled).eval(&values).projection
    );
}

#[test]
fn test_compiled_logic_file_round_trip() {
    let rule = LogicRule::new("prefill", "prefill", ConditionType::All)
        .when(LogicCondition::new("rating", ConditionOperator::GreaterThan, Some(Value::from(4.0))))
        .then(LogicAction::set_value("comments", vec!["a", "b"]));
    let compiled = Compiler::builder(contact_form(vec![rule, low_rating_rule()]))
        .build()
        .compile()
        .unwrap();

    let path = std::env::temp_dir().join(format!("formlogic-{}.bin", std::process::id()));
    let path = path.to_str().unwrap();
    compiled.save(path).unwrap();
    let restored = CompiledLogic::from_file(path).unwrap();
    std::fs::remove_file(path).unwrap();

    assert_eq!(restored, compiled);
}

#[test]
fn test_loading_missing_artifact_fails() {
    let err = CompiledLogic::from_file("/definitely/not/here.bin").unwrap_err();
    assert!(matches!(err, ArtifactError::Io { .. }));
}

#[test]
fn test_corrupt_artifact_fails() {
    let err = CompiledLogic::from_bytes(&[0xff, 0x00, 0x13]).unwrap_err();
    assert!(matches!(err, ArtifactError::Deserialization(_)));
}
