mod common;

use common::{init_tracing, v};
use mergify::{MergeError, Record, Value, merge, merge_all};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn empty_fold_is_an_error() {
    init_tracing();
    let err = merge_all(Vec::<Value>::new()).unwrap_err();
    assert!(matches!(err, MergeError::EmptyFold));
    assert!(matches!(merge_all!(), Err(MergeError::EmptyFold)));
}

#[test]
fn single_value_is_returned_unchanged() {
    let only = v(json!({"a": [1]}));
    let result = merge_all([only.clone()]).unwrap();
    assert!(result.is_same(&only));
}

#[test]
fn fold_matches_nested_binary_merges() {
    let inputs = || {
        [
            v(json!({"a": 1, "b": {"c": [1]}})),
            v(json!({"b": {"c": [2], "d": true}})),
            v(json!({"a": null, "e": "x"})),
        ]
    };

    let [a, b, c] = inputs();
    let nested = merge(merge(a, b).unwrap(), c).unwrap();
    let folded = merge_all(inputs()).unwrap();

    assert_eq!(folded, nested);
}

#[test]
fn fold_mutates_the_first_value() {
    let first = Record::new();
    let result = merge_all!(first.clone(), v(json!({"a": 1})), v(json!({"b": 2}))).unwrap();

    assert!(result.as_record().unwrap().ptr_eq(&first));
    assert_eq!(Value::from(first), v(json!({"a": 1, "b": 2})));
}

#[test]
fn macro_converts_arguments() {
    assert_eq!(merge_all!(1, "two", true).unwrap(), Value::from(true));
    assert_eq!(merge_all!(Value::Null, 3.5,).unwrap(), Value::from(3.5));
}

#[test]
fn absent_values_in_the_fold_are_neutral() {
    let result = merge_all!(
        Value::Absent,
        v(json!({"a": 1})),
        Value::Absent,
        Value::Absent
    )
    .unwrap();
    assert_eq!(result, v(json!({"a": 1})));
}

#[test]
fn later_null_resets_the_accumulator() {
    let result = merge_all!(v(json!({"a": 1})), Value::Null, v(json!({"b": 2}))).unwrap();
    assert_eq!(result, v(json!({"b": 2})));
}

#[test]
fn fold_accepts_any_iterator() {
    let result =
        merge_all((0..5).map(|n| Value::from(Record::new().with(format!("k{n}"), n)))).unwrap();
    assert_eq!(
        result,
        v(json!({"k0": 0, "k1": 1, "k2": 2, "k3": 3, "k4": 4}))
    );
}
