//! Merging through custom set-like and map-like containers.

mod common;

use common::v;
use mergify::{Element, MapLike, MapValue, MergeError, SetLike, SetValue, Value, merge};
use mergify_types::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A set of numbers kept in sorted order, rejecting anything else.
#[derive(Debug, Default)]
struct SortedNumbers(Vec<f64>);

impl SetLike for SortedNumbers {
    fn add(&mut self, value: Value) -> mergify_types::Result<()> {
        let n = value
            .as_f64()
            .ok_or_else(|| Error::capability("set add", format!("not a number: {value:?}")))?;
        if let Err(at) = self.0.binary_search_by(|x| x.total_cmp(&n)) {
            self.0.insert(at, n);
        }
        Ok(())
    }

    fn values(&self) -> mergify_types::Result<Vec<Value>> {
        Ok(self.0.iter().copied().map(Value::from).collect())
    }

    fn has(&self, value: &Value) -> bool {
        value.as_f64().is_some_and(|n| self.0.contains(&n))
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// A map with string keys kept in key order.
#[derive(Debug, Default)]
struct StringKeyed(BTreeMap<String, Value>);

impl MapLike for StringKeyed {
    fn get(&self, key: &Value) -> mergify_types::Result<Value> {
        let key = key
            .as_str()
            .ok_or_else(|| Error::capability("map get", "keys must be strings"))?;
        Ok(self.0.get(key).cloned().unwrap_or_default())
    }

    fn set(&mut self, key: Value, value: Value) -> mergify_types::Result<()> {
        let key = key
            .as_str()
            .ok_or_else(|| Error::capability("map set", "keys must be strings"))?;
        self.0.insert(key.to_owned(), value);
        Ok(())
    }

    fn entries(&self) -> mergify_types::Result<Vec<(Value, Value)>> {
        Ok(self
            .0
            .iter()
            .map(|(k, v)| (Value::from(k.as_str()), v.clone()))
            .collect())
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// A map that cannot be enumerated.
#[derive(Debug, Default)]
struct WriteOnly;

impl MapLike for WriteOnly {
    fn get(&self, _key: &Value) -> mergify_types::Result<Value> {
        Ok(Value::Absent)
    }

    fn set(&mut self, _key: Value, _value: Value) -> mergify_types::Result<()> {
        Ok(())
    }

    fn entries(&self) -> mergify_types::Result<Vec<(Value, Value)>> {
        Err(Error::capability("map entries", "write-only map"))
    }

    fn len(&self) -> usize {
        0
    }
}

// ── sets ───────────────────────────────────────────────────────

#[test]
fn custom_set_receives_union() {
    let target = SetValue::from_container(SortedNumbers::default());
    target.add(5).unwrap();
    let source: SetValue = [3, 9, 5].into_iter().collect();

    let result = merge(target.clone().into(), source.into()).unwrap();

    assert!(result.as_set().unwrap().ptr_eq(&target));
    assert_eq!(
        target.values().unwrap(),
        vec![Value::from(3), Value::from(5), Value::from(9)]
    );
}

#[test]
fn default_set_absorbs_custom_set() {
    let source = SetValue::from_container(SortedNumbers::default());
    source.add(2).unwrap();
    source.add(1).unwrap();
    let target: SetValue = [7].into_iter().collect();

    merge(target.clone().into(), source.into()).unwrap();

    assert_eq!(
        target.values().unwrap(),
        vec![Value::from(7), Value::from(1), Value::from(2)]
    );
}

#[test]
fn hash_set_backed_values_merge() {
    let target = SetValue::from_container(HashSet::<Element>::new());
    let source: SetValue = ["x", "y"].into_iter().collect();

    merge(target.clone().into(), source.into()).unwrap();

    assert_eq!(target.len(), 2);
    assert!(target.has(&"x".into()));
    assert!(target.has(&"y".into()));
}

#[test]
fn set_rejection_propagates() {
    let target = SetValue::from_container(SortedNumbers::default());
    let source: SetValue = [Value::from(1), Value::from("two")].into_iter().collect();

    let err = merge(target.clone().into(), source.into()).unwrap_err();

    match err {
        MergeError::Value(Error::Capability { operation, message }) => {
            assert_eq!(operation, "set add");
            assert!(message.contains("two"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Elements added before the failure stay added.
    assert_eq!(target.len(), 1);
}

// ── maps ───────────────────────────────────────────────────────

#[test]
fn custom_map_merges_entries() {
    let target = MapValue::from_container(StringKeyed::default());
    target.set("b", v(json!({"x": 1}))).unwrap();
    let source: MapValue = [("b", v(json!({"y": 2}))), ("a", Value::from(1))]
        .into_iter()
        .collect();

    merge(target.clone().into(), source.into()).unwrap();

    assert_eq!(
        target.entries().unwrap(),
        vec![
            (Value::from("a"), Value::from(1)),
            (Value::from("b"), v(json!({"x": 1, "y": 2}))),
        ]
    );
}

#[test]
fn hash_map_backed_values_merge() {
    let target = MapValue::from_container(HashMap::<Element, Value>::new());
    target.set(1, "one").unwrap();
    let source: MapValue = [(1, "uno"), (2, "dos")].into_iter().collect();

    merge(target.clone().into(), source.into()).unwrap();

    assert_eq!(target.len(), 2);
    assert_eq!(target.get(&1.into()).unwrap(), Value::from("uno"));
}

#[test]
fn map_key_rejection_propagates() {
    let target = MapValue::from_container(StringKeyed::default());
    let source: MapValue = [(1, 2)].into_iter().collect();

    let err = merge(target.into(), source.into()).unwrap_err();

    assert!(matches!(
        err,
        MergeError::Value(Error::Capability {
            operation: "map get",
            ..
        })
    ));
}

#[test]
fn unenumerable_source_map_propagates() {
    let source = MapValue::from_container(WriteOnly);
    let err = merge(MapValue::new().into(), source.into()).unwrap_err();
    assert!(err.to_string().contains("write-only map"));
}

#[test]
fn nested_container_errors_surface_from_records() {
    let target = v(json!({"inner": {}}));
    let set = SetValue::from_container(SortedNumbers::default());
    target.get("inner").as_record().unwrap().set("nums", set);
    let source = v(json!({"inner": {}}));
    let strings: SetValue = ["a"].into_iter().collect();
    source.get("inner").as_record().unwrap().set("nums", strings);

    let err = merge(target, source).unwrap_err();

    assert!(matches!(err, MergeError::Value(_)));
}
