mod common;

use common::{instance, v};
use mergify::{
    Class, Function, Kind, MapValue, Opaque, Record, SetValue, Symbol, Value, is_plain_record,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::rc::Rc;

#[test]
fn classifies_absent_and_null() {
    assert_eq!(Kind::of(&Value::Absent), Kind::Absent);
    assert_eq!(Kind::of(&Value::Null), Kind::Null);
}

#[test]
fn classifies_scalars() {
    for value in [
        Value::from(true),
        Value::from(1.5),
        Value::from("text"),
        Value::from(Symbol::new("s")),
    ] {
        assert_eq!(Kind::of(&value), Kind::Scalar, "{value:?}");
    }
}

#[test]
fn classifies_containers() {
    assert_eq!(Kind::of(&v(json!({}))), Kind::Record);
    assert_eq!(Kind::of(&v(json!([]))), Kind::Sequence);
    assert_eq!(Kind::of(&SetValue::new().into()), Kind::SetLike);
    assert_eq!(Kind::of(&MapValue::new().into()), Kind::MapLike);
}

#[test]
fn class_instances_functions_and_host_values_are_opaque() {
    let class = Rc::new(Class::new("Widget"));
    for value in [
        instance(&class, json!({"id": 1})),
        Value::from(Function::new("f", |_| Value::Null)),
        Value::from(Opaque::new(42u64)),
    ] {
        assert_eq!(Kind::of(&value), Kind::Opaque, "{value:?}");
    }
}

#[test]
fn plain_records_include_bare_ones() {
    assert!(is_plain_record(&Value::record()));
    assert!(is_plain_record(&Record::bare().into()));
}

#[test]
fn non_records_are_not_plain() {
    let class = Rc::new(Class::new("Widget"));
    assert!(!is_plain_record(&Record::instance(&class).into()));
    assert!(!is_plain_record(&v(json!([]))));
    assert!(!is_plain_record(&Value::Null));
    assert!(!is_plain_record(&Value::from("{}")));
    assert!(!is_plain_record(&MapValue::new().into()));
}
