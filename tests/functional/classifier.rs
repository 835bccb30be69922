//! Classifier and declared-type resolution through the facade.

use crate::common::*;
use closure_contracts::*;
use proptest::prelude::*;

#[test]
fn every_synonym_maps_back_to_its_category() {
    for category in SemanticType::all() {
        for synonym in category.synonyms() {
            assert_eq!(classify_name(synonym).unwrap(), *category, "{synonym}");
            assert_eq!(classify_name(&synonym.to_uppercase()).unwrap(), *category);
        }
        assert_eq!(category.synonyms()[0], category.canonical_name());
    }
}

#[test]
fn synonyms_are_interchangeable_as_declared_types() {
    let pairs = [
        ("int", "integer", Value::Int(3)),
        ("bool", "boolean", Value::Bool(true)),
        ("double", "float", Value::Float(0.25)),
        ("void", "null", Value::Null),
    ];
    for (short, long, value) in pairs {
        assert!(validate_type(&value, short).is_ok(), "{short}");
        assert!(validate_type(&value, long).is_ok(), "{long}");
        assert_eq!(
            DeclaredType::resolve(short).unwrap(),
            DeclaredType::resolve(long).unwrap()
        );
    }
}

#[test]
fn unknown_names_are_rejected() {
    for name in ["frobnicate", "", "integers", "mixed"] {
        let err = classify_name(name).unwrap_err();
        assert!(err.is_unrecognized_type_name(), "{name}");
    }
    assert!(DeclaredType::resolve("frobnicate")
        .unwrap_err()
        .is_unrecognized_type_name());
}

#[test]
fn classes_resolve_only_after_registration() {
    assert!(DeclaredType::resolve("ClassifierLate").is_err());
    let function = Function::of(Closure::unary(|v| v), Some("ClassifierLate")).unwrap();

    class("ClassifierLate");
    let instance = object("ClassifierLate", []);
    assert_eq!(function.apply(instance.clone()).unwrap(), instance);
}

#[test]
fn objects_never_satisfy_category_names() {
    class("ClassifierThing");
    let thing = object("ClassifierThing", []);
    assert_eq!(classify_value(&thing), SemanticType::Object);

    let err = validate_type(&thing, "object").unwrap_err();
    assert!(err.is_functional_type());
    assert!(validate_type(&thing, "ClassifierThing").is_ok());
    assert!(validate_type(&Value::Int(1), "ClassifierThing")
        .unwrap_err()
        .is_functional_type());
}

#[test]
fn json_objects_are_std_class_instances() {
    let value = Value::from(serde_json::json!({"a": 1, "b": [true, null]}));
    assert_eq!(value.describe(), "stdClass");
    assert!(validate_type(&value, "stdClass").is_ok());
    let fields = value.as_object().unwrap();
    assert_eq!(fields.get("a"), Some(Value::Int(1)));
}

proptest! {
    #[test]
    fn classify_name_never_panics(name in "\\PC{0,24}") {
        let _ = classify_name(&name);
    }

    #[test]
    fn canonical_synonym_is_a_fixed_point(index in 0usize..SemanticType::ALL.len()) {
        let category = SemanticType::ALL[index];
        for synonym in category.synonyms() {
            let canonical = canonical_synonym(synonym).unwrap();
            prop_assert_eq!(canonical_synonym(canonical).unwrap(), canonical);
            prop_assert_eq!(classify_name(canonical).unwrap(), category);
        }
    }
}
