//! Errors as callers see them: normalized, with the raw cause attached.

use crate::common::*;
use closure_contracts::*;
use std::error::Error as StdError;

fn typed_square() -> Closure {
    Closure::builder()
        .named("square")
        .typed_param("n", "int")
        .returns("int")
        .build(|args| match args.first() {
            Some(Value::Int(n)) => Ok(Value::Int(n * n)),
            _ => Err(CallError::failed("unreachable")),
        })
}

#[test]
fn signature_mismatch_surfaces_as_functional_type_error() {
    init_tracing();
    let square = Function::of(typed_square(), None).unwrap();
    let err = square.apply(Value::from("3")).unwrap_err();

    assert!(err.is_functional_type());
    let message = err.to_string();
    assert_eq!(
        message,
        "square: Argument #1 must be of type int, string given, called by the wrapper"
    );
    assert!(!message.contains('('));
    assert!(!message.contains("class@anonymous"));
    assert!(!message.contains("  "));
}

#[test]
fn raw_error_is_kept_as_cause() {
    let square = Function::of(typed_square(), None).unwrap();
    let Error::FunctionalType(err) = square.apply(Value::Bool(true)).unwrap_err() else {
        panic!("expected a functional type error");
    };
    let source = err.source().expect("translated errors keep their cause");
    let raw = source.to_string();
    assert!(raw.contains("class@anonymous::apply at"));
    assert!(raw.contains("function.rs"));
}

#[test]
fn every_shape_translates_boundary_errors() {
    let typed_unary = || {
        Closure::builder()
            .typed_param("n", "int")
            .build(|_| Ok(Value::Bool(true)))
    };
    let typed_binary = || {
        Closure::builder()
            .typed_param("a", "int")
            .typed_param("b", "int")
            .build(|_| Ok(Value::Null))
    };
    let s = || Value::from("not a number");

    let outcomes: Vec<(&str, Error)> = vec![
        ("Consumer", Consumer::of(typed_unary(), None).unwrap().accept(s()).unwrap_err()),
        ("Function", Function::of(typed_unary(), None).unwrap().apply(s()).unwrap_err()),
        ("Predicate", Predicate::of(typed_unary(), None).unwrap().test(s()).unwrap_err()),
        (
            "ToIntFunction",
            ToIntFunction::of(typed_unary(), None).unwrap().apply_as_int(s()).unwrap_err(),
        ),
        (
            "ToFloatFunction",
            ToFloatFunction::of(typed_unary(), None).unwrap().apply_as_float(s()).unwrap_err(),
        ),
        (
            "UnaryOperator",
            UnaryOperator::of(typed_unary(), None).unwrap().apply(s()).unwrap_err(),
        ),
        (
            "BiConsumer",
            BiConsumer::of(typed_binary(), None).unwrap().accept(Value::Int(1), s()).unwrap_err(),
        ),
        (
            "BiFunction",
            BiFunction::of(typed_binary(), None)
                .unwrap()
                .apply(Value::Int(1), s())
                .unwrap_err(),
        ),
        (
            "BinaryOperator",
            BinaryOperator::of(typed_binary(), None)
                .unwrap()
                .apply(Value::Int(1), s())
                .unwrap_err(),
        ),
    ];

    for (shape, err) in outcomes {
        assert!(err.is_functional_type(), "{shape}: {err:?}");
        let message = err.to_string();
        assert!(message.contains("must be of type int, string given"), "{shape}: {message}");
        assert!(!message.contains("class@anonymous"), "{shape}: {message}");
    }
}

#[test]
fn int_function_closure_signature_can_reject_raw_integer() {
    let closure = Closure::builder()
        .typed_param("name", "string")
        .build(|args| Ok(args.into_iter().next().unwrap_or(Value::Null)));
    let function = IntFunction::of(closure, None).unwrap();
    let err = function.apply(42).unwrap_err();
    assert!(err
        .to_string()
        .contains("must be of type string, integer given"));
}

#[test]
fn return_hint_mismatch_is_translated() {
    let closure = Closure::builder()
        .named("lies")
        .returns("int")
        .build(|_| Ok(Value::from("surprise")));
    let supplier = Supplier::of(closure, None).unwrap();
    assert_eq!(
        supplier.get().unwrap_err().to_string(),
        "lies: Return value must be of type int, string returned"
    );
}

#[test]
fn body_failures_are_not_type_errors() {
    let closure = Closure::builder()
        .named("flaky")
        .build(|_| Err(CallError::failed("upstream unavailable")));
    let runnable = Runnable::of(closure, None).unwrap();
    let err = runnable.run().unwrap_err();
    assert!(!err.is_functional_type());
    assert_eq!(err.to_string(), "closure flaky failed: upstream unavailable");
}

#[test]
fn translator_round_trip() {
    let translator = ErrorTranslator::default();
    let raw = CallError::type_mismatch(
        "Return value (Foo::bar) must be  of type Point,   class@anonymous\tgiven",
    );
    let err = translator.translate(raw);
    assert!(!err.message().contains("(Foo::bar)"));
    assert!(!err.message().contains("class@anonymous"));
    assert!(!err.message().contains("  "));
    assert_eq!(
        err.message(),
        "Return value must be of type Point, the wrapper given"
    );
}

#[test]
fn unrecognized_declared_type_surfaces_at_call_time() {
    let function = Function::of(Closure::unary(|v| v), Some("frobnicate")).unwrap();
    let err = function.apply(Value::Int(1)).unwrap_err();
    assert!(err.is_unrecognized_type_name());
    assert_eq!(err.to_string(), "unrecognized type name: 'frobnicate'");
}

#[test]
fn placeholder_comes_from_loaded_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "wrapper_placeholder = \"a closure wrapper\"\n").unwrap();
    let config = ContractConfig::from_file(&path).unwrap();
    assert!(config.validate_types);

    let contract = ClosureContract::create(typed_square(), 1)
        .unwrap()
        .with_config(std::sync::Arc::new(config))
        .unwrap();
    let err = contract.invoke("apply", vec![Value::Null]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "square: Argument #1 must be of type int, null given, called by a closure wrapper"
    );
}

#[test]
fn disabled_validation_still_checks_closure_signature() {
    let config = ContractConfig::from_toml_str("validate_types = false").unwrap();
    let contract = ClosureContract::new(typed_square(), 1, Some("string"))
        .unwrap()
        .with_config(std::sync::Arc::new(config))
        .unwrap();

    let result = contract.invoke("apply", vec![Value::Int(4)]).unwrap();
    assert!(contract.validate_declared(&result).is_ok());
    assert!(contract
        .invoke("apply", vec![Value::from("4")])
        .unwrap_err()
        .is_functional_type());
}
