//! Shared test utilities for the functional wrapper suite.

#![allow(dead_code)]

use closure_contracts::{ClassDef, ClassHandle, ClassRegistry, ObjectRef, Value};
use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness (shown with `--nocapture`).
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Register a root class (idempotent across tests).
pub fn class(name: &str) -> ClassHandle {
    ClassRegistry::register(ClassDef::new(name)).expect("Failed to register class")
}

/// Register a class with a parent (idempotent across tests).
pub fn subclass(name: &str, parent: &str) -> ClassHandle {
    class(parent);
    ClassRegistry::register(ClassDef::new(name).extends(parent))
        .expect("Failed to register subclass")
}

/// Fresh instance of a registered class with the given fields.
pub fn object<const N: usize>(class_name: &str, fields: [(&str, Value); N]) -> Value {
    let class = ClassRegistry::resolve(class_name).expect("Class must be registered");
    Value::Object(ObjectRef::with_fields(class, fields))
}

/// Read an integer field of an object value.
pub fn int_field(value: &Value, field: &str) -> Option<i64> {
    value.as_object()?.get(field)?.as_int()
}
