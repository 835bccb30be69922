//! Same-type operators: type learning and operand checks.

use crate::common::*;
use closure_contracts::*;

// ============================================================================
// UnaryOperator
// ============================================================================

#[test]
fn unary_operator_learns_class_from_first_call() {
    init_tracing();
    class("OpsMoney");
    class("OpsDistance");

    let scale = UnaryOperator::of(
        Closure::unary(|v| {
            if let Some(object) = v.as_object() {
                let amount = object.get("amount").and_then(|a| a.as_int()).unwrap_or(0);
                object.set("amount", amount * 2);
            }
            v
        }),
        None,
    )
    .unwrap();

    let money = object("OpsMoney", [("amount", Value::Int(5))]);
    let result = scale.apply(money).unwrap();
    assert_eq!(int_field(&result, "amount"), Some(10));

    let distance = object("OpsDistance", [("amount", Value::Int(5))]);
    let err = scale.apply(distance).unwrap_err();
    assert!(err.is_functional_type());
    assert_eq!(
        err.to_string(),
        "value must be of type OpsMoney, OpsDistance given"
    );

    let again = scale.apply(object("OpsMoney", [("amount", Value::Int(1))])).unwrap();
    assert_eq!(int_field(&again, "amount"), Some(2));
}

#[test]
fn unary_operator_learning_uses_identity_not_subtyping() {
    subclass("OpsEuro", "OpsCurrency");
    let identity = UnaryOperator::of(Closure::unary(|v| v), None).unwrap();

    identity.apply(object("OpsCurrency", [])).unwrap();
    assert!(identity
        .apply(object("OpsEuro", []))
        .unwrap_err()
        .is_functional_type());
}

#[test]
fn unary_operator_declared_supertype_rejects_subclass() {
    subclass("OpsSquare", "OpsShape");
    let identity = UnaryOperator::of(Closure::unary(|v| v), Some("OpsShape")).unwrap();

    identity.apply(object("OpsShape", [])).unwrap();
    assert!(identity
        .apply(object("OpsSquare", []))
        .unwrap_err()
        .is_functional_type());
}

#[test]
fn unary_operator_learns_scalar_category() {
    let increment = UnaryOperator::of(Closure::unary(|v| v.as_int().map(|n| n + 1)), None).unwrap();

    assert_eq!(increment.apply(Value::Int(1)).unwrap(), Value::Int(2));
    assert_eq!(
        increment.state(),
        TypeState::Learned(DeclaredType::Category(SemanticType::Integer))
    );
    // Closure returns null for strings; the string operand itself is rejected
    let err = increment.apply(Value::from("1")).unwrap_err();
    assert_eq!(err.to_string(), "value must be of type integer, string given");
}

// ============================================================================
// BinaryOperator
// ============================================================================

fn merge_counts() -> Closure {
    Closure::binary(|left, right| {
        let total = int_field(&left, "count").unwrap_or(0) + int_field(&right, "count").unwrap_or(0);
        for side in [&left, &right] {
            if let Some(object) = side.as_object() {
                object.set("merged", true);
            }
        }
        if let Some(object) = left.as_object() {
            object.set("count", total);
        }
        left
    })
}

#[test]
fn binary_operator_combines_same_class() {
    class("OpsCounter");
    let merge = BinaryOperator::of(merge_counts(), Some("OpsCounter")).unwrap();

    let a = object("OpsCounter", [("count", Value::Int(2))]);
    let b = object("OpsCounter", [("count", Value::Int(3))]);
    let result = merge.apply(a, b).unwrap();
    assert_eq!(int_field(&result, "count"), Some(5));
}

#[test]
fn binary_operator_rejects_operand_before_any_mutation() {
    class("OpsTally");
    class("OpsStranger");
    let merge = BinaryOperator::of(merge_counts(), Some("OpsTally")).unwrap();

    let good = object("OpsTally", [("count", Value::Int(2))]);
    let bad = object("OpsStranger", [("count", Value::Int(3))]);

    let err = merge.apply(good.clone(), bad.clone()).unwrap_err();
    assert!(err.is_functional_type());
    assert_eq!(good.as_object().unwrap().get("merged"), None);
    assert_eq!(bad.as_object().unwrap().get("merged"), None);
    assert_eq!(int_field(&good, "count"), Some(2));

    let err = merge.apply(bad.clone(), good.clone()).unwrap_err();
    assert!(err.is_functional_type());
    assert_eq!(bad.as_object().unwrap().get("merged"), None);
}

#[test]
fn bi_function_does_not_check_operands() {
    class("OpsLoose");
    class("OpsOther");
    let merge = BiFunction::of(merge_counts(), Some("OpsLoose")).unwrap();

    let left = object("OpsLoose", [("count", Value::Int(1))]);
    let right = object("OpsOther", [("count", Value::Int(1))]);
    merge.apply(left, right.clone()).unwrap();
    // The closure ran: the mismatched operand was touched
    assert_eq!(
        right.as_object().unwrap().get("merged"),
        Some(Value::Bool(true))
    );
}
