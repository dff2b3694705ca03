//! Shared test helpers for merge tests.

#![allow(dead_code)]

use mergify::{Class, PropertyKey, Record, Value};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; verbosity comes from `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a value from a JSON literal.
pub fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

pub fn key(s: &str) -> PropertyKey {
    PropertyKey::from(s)
}

/// Builds an instance of `class` with the given own fields, the way a
/// constructor copying its argument would.
pub fn instance(class: &Rc<Class>, fields: serde_json::Value) -> Value {
    let record = Record::instance(class);
    if let Value::Record(source) = v(fields) {
        for (k, value) in source.entries() {
            record.set(k, value);
        }
    }
    Value::Record(record)
}
