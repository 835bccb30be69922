//! Objects travel by reference; other values by copy.

use crate::common::*;
use closure_contracts::*;

#[test]
fn bi_function_mutation_reaches_only_the_mutated_argument() {
    class("AliasVector");
    let bump_first = BiFunction::of(
        Closure::binary(|first, _second| {
            if let Some(object) = first.as_object() {
                let x = object.get("x").and_then(|x| x.as_int()).unwrap_or(0);
                object.set("x", x + 100);
            }
            first
        }),
        Some("AliasVector"),
    )
    .unwrap();

    let first = object("AliasVector", [("x", Value::Int(1))]);
    let second = object("AliasVector", [("x", Value::Int(1))]);
    let result = bump_first.apply(first.clone(), second.clone()).unwrap();

    assert_eq!(int_field(&result, "x"), Some(101));
    assert_eq!(int_field(&first, "x"), Some(101));
    assert_eq!(int_field(&second, "x"), Some(1));
    assert!(result.as_object().unwrap().ptr_eq(first.as_object().unwrap()));
    assert!(!result.as_object().unwrap().ptr_eq(second.as_object().unwrap()));
}

#[test]
fn arrays_are_copied_into_the_closure() {
    let append = Function::of(
        Closure::unary(|v| {
            let mut items = v.as_array().map(<[Value]>::to_vec).unwrap_or_default();
            items.push(Value::Int(99));
            items
        }),
        Some("array"),
    )
    .unwrap();

    let original = Value::Array(vec![Value::Int(1)]);
    let result = append.apply(original.clone()).unwrap();
    assert_eq!(result, Value::Array(vec![Value::Int(1), Value::Int(99)]));
    assert_eq!(original, Value::Array(vec![Value::Int(1)]));
}

#[test]
fn supplier_can_hand_out_a_shared_instance() {
    class("AliasSingleton");
    let shared = object("AliasSingleton", [("hits", Value::Int(0))]);
    let handed_out = shared.clone();
    let supplier = Supplier::of(
        Closure::nullary(move || handed_out.clone()),
        Some("AliasSingleton"),
    )
    .unwrap();

    let a = supplier.get().unwrap();
    a.as_object().unwrap().set("hits", 1);
    let b = supplier.get().unwrap();
    assert_eq!(int_field(&b, "hits"), Some(1));
    assert_eq!(int_field(&shared, "hits"), Some(1));
}

#[test]
fn closing_a_handle_inside_a_consumer_is_observed() {
    let handle = HandleRef::open("socket");
    let close = Consumer::of(
        Closure::unary(|v| {
            if let Some(handle) = v.as_handle() {
                handle.close();
            }
        }),
        None,
    )
    .unwrap();

    let value = Value::Handle(handle.clone());
    assert_eq!(classify_value(&value), SemanticType::ExternalHandle);
    close.accept(value.clone()).unwrap();
    assert!(handle.is_closed());
    assert_eq!(classify_value(&value), SemanticType::ClosedHandle);
}
