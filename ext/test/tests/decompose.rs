//! Decomposition through the public API, against the shared test records

use recmix::{try_apply_with_trace, Compatibility, NoMatchReason, MAX_ARMS};
use recmix_test::prelude::*;
use std::cell::Cell;
use std::sync::Arc;

#[test]
fn test_apply_binds_in_declaration_order() {
    let name = Name::new("Benji", "Weber");
    let outcome = try_apply(&name, |first: String, last: String| format!("{last}, {first}"));
    assert_eq!(outcome, MatchOutcome::Matched("Weber, Benji".to_string()));
}

#[test]
fn test_apply_prefix_of_longer_record() {
    let name = NameWithMiddle::new("A", "B", "C");
    let outcome = try_apply(&name, |first: String, middle: String| first + &middle);
    assert_eq!(outcome.into_option().as_deref(), Some("AB"));
}

#[test]
fn test_apply_rejects_wrong_types() {
    let person = Person::new("Bob", 5, 2.5);
    assert!(try_apply(&person, |_: String, _: i64| ()).is_no_match());
    assert!(try_apply(&person, |_: String, _: i32, _: f32| ()).is_no_match());
    assert!(try_apply(&person, |_: String, _: i32, _: f64| ()).is_matched());
}

#[test]
fn test_accept_calls_only_on_match() {
    let calls = Cell::new(0);
    try_accept(&Nums::new(1, 2), |a: i32, b: i32| calls.set(calls.get() + a + b));
    try_accept(&Nums::new(1, 2), |_: String| calls.set(100));
    try_accept(&"not a record", |_: i32| calls.set(100));
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_fallback() {
    let result = with_fallback("Fail").try_apply(&Colour::new(1, 2, 3), |_: String| "Success");
    assert_eq!(result, "Fail");
    let result = with_fallback("Fail").try_apply(&Colour::new(1, 2, 3), |_: i32| "Success");
    assert_eq!(result, "Success");
}

#[test]
fn test_capability_parameters() {
    let zoo = Zoo::new(Duck, Dog);
    let noises = try_apply(&zoo, |one: Arc<dyn Animal>, two: Arc<dyn Animal>| {
        format!("{}{}", one.noise(), two.noise())
    });
    assert_eq!(noises.into_option().as_deref(), Some("QuackWoof"));

    assert!(try_apply(&zoo, |_: Duck, _: Dog| ()).is_matched());
    assert!(try_apply(&zoo, |_: Dog, _: Arc<dyn Animal>| ()).is_no_match());
}

#[test]
fn test_boxing_both_ways() {
    let score = Score::new(7, 3);
    let sum = try_apply(&score, |a: i32, b: Box<i32>| a + *b);
    assert_eq!(sum, MatchOutcome::Matched(10));
    let (_, trace) = try_apply_with_trace(&score, |_: i32, _: Box<i32>| ());
    let kinds: Vec<_> = trace.steps.iter().map(|s| s.compatibility).collect();
    assert_eq!(kinds, vec![Some(Compatibility::Boxing), Some(Compatibility::Boxing)]);
}

#[test]
fn test_trace_names_fields() {
    let (outcome, trace) = try_apply_with_trace(&Person::new("Bob", 5, 2.5), |_: String, _: String| ());
    assert!(outcome.is_no_match());
    assert_eq!(trace.steps.len(), 2);
    assert_eq!(trace.steps[0].field, "name");
    assert_eq!(trace.steps[1].field, "age");
    assert!(matches!(
        trace.reason,
        Some(NoMatchReason::Incompatible { position: 1, .. })
    ));
}

#[test]
fn test_cases_dispatch() {
    let cases = Cases::new()
        .case(|_: Arc<dyn Animal>, _: Arc<dyn Animal>| "zoo")
        .case(|first: String, _: String| if first.is_empty() { "anonymous" } else { "name" })
        .case(|_: i32, _: i32, _: i32| "three ints")
        .otherwise("unknown");

    assert!(cases.validate().is_ok());
    assert!(cases.len() < MAX_ARMS);
    assert_eq!(cases.evaluate(&Zoo::new(Dog, Dog)), Some("zoo"));
    assert_eq!(cases.evaluate(&Name::new("", "x")), Some("anonymous"));
    assert_eq!(cases.evaluate(&Town::new(1, 2, 3)), Some("three ints"));
    assert_eq!(cases.evaluate(&Nums::new(1, 2)), Some("unknown"));
}

#[test]
fn test_cases_trace_agrees_with_evaluate() {
    let cases = Cases::new().case(|_: i32| 1).case(|_: String| 2);
    for candidate in [&Nums::new(1, 2) as &dyn Component, &Name::new("a", "b"), &Duck] {
        let (result, trace) = cases.evaluate_with_trace(candidate);
        assert_eq!(result, cases.evaluate(candidate));
        assert_eq!(trace.matched_arm.is_some(), result.is_some());
        assert!(!trace.used_fallback);
    }
}
