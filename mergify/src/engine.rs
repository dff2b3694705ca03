//! The binary merge.

use crate::{Kind, MergeResult};
use mergify_types::{MapValue, PropertyKey, Record, Sequence, SetValue, Value};
use tracing::trace;

/// Merges `source` into `target`.
///
/// Both operands are classified with [`Kind::of`] and the first matching
/// rule applies:
///
/// 1. `source` is absent: `target` is returned unchanged.
/// 2. `source` is null, or `target` is null or absent: `source` is returned.
/// 3. `target` is a plain record or a sequence and `source` is a plain
///    record: each enumerable own key of `source` (string keys, then symbol
///    keys) is merged into `target` recursively. Index keys address sequence
///    slots and `"length"` resizes a sequence. `target` is mutated and
///    returned.
/// 4. Both are sequences: a new sequence holding `target`'s slots followed
///    by `source`'s is returned.
/// 5. Both are set-like: `source`'s elements are added to `target`, which is
///    returned.
/// 6. Both are map-like: each entry of `source` is merged into the entry of
///    `target` with the same key, and `target` is returned.
/// 7. Otherwise `source` replaces `target`.
///
/// The result aliases its inputs: mutated containers are the `target`
/// handle and anything replaced wholesale is the `source` handle. Clone
/// `target` with [`Value::deep_clone`] first if it must stay untouched.
///
/// There is no cycle detection; merging a structure that contains itself
/// recurses without bound.
///
/// # Errors
///
/// Fails if a set-like or map-like container reports an error, which is
/// returned unchanged, or if a sequence's `"length"` is merged to an invalid
/// length. `target` may be partially merged at that point.
pub fn merge(target: Value, source: Value) -> MergeResult<Value> {
    let kinds = (Kind::of(&target), Kind::of(&source));
    match (kinds, target, source) {
        ((_, Kind::Absent), target, _) => Ok(target),
        ((_, Kind::Null), _, source) | ((Kind::Absent | Kind::Null, _), _, source) => Ok(source),
        ((Kind::Record, Kind::Record), Value::Record(target), Value::Record(source)) => {
            trace!(keys = source.len(), "merging record into record");
            merge_fields(&target, &source)?;
            Ok(Value::Record(target))
        }
        ((Kind::Sequence, Kind::Record), Value::Sequence(target), Value::Record(source)) => {
            trace!(keys = source.len(), "merging record into sequence");
            merge_fields(&target, &source)?;
            Ok(Value::Sequence(target))
        }
        ((Kind::Sequence, Kind::Sequence), Value::Sequence(target), Value::Sequence(source)) => {
            trace!(
                left = target.len(),
                right = source.len(),
                "concatenating sequences"
            );
            Ok(Value::Sequence(target.concat(&source)))
        }
        ((Kind::SetLike, Kind::SetLike), Value::Set(target), Value::Set(source)) => {
            trace!(incoming = source.len(), "merging sets");
            union(&target, &source)?;
            Ok(Value::Set(target))
        }
        ((Kind::MapLike, Kind::MapLike), Value::Map(target), Value::Map(source)) => {
            trace!(incoming = source.len(), "merging maps");
            merge_entries(&target, &source)?;
            Ok(Value::Map(target))
        }
        (_, _, source) => Ok(source),
    }
}

/// A container whose properties can be merged into by key.
trait Fields {
    fn read(&self, key: &PropertyKey) -> Value;
    fn write(&self, key: PropertyKey, value: Value) -> mergify_types::Result<()>;
}

impl Fields for Record {
    fn read(&self, key: &PropertyKey) -> Value {
        self.get(key)
    }

    fn write(&self, key: PropertyKey, value: Value) -> mergify_types::Result<()> {
        self.set(key, value);
        Ok(())
    }
}

impl Fields for Sequence {
    fn read(&self, key: &PropertyKey) -> Value {
        self.get_key(key)
    }

    fn write(&self, key: PropertyKey, value: Value) -> mergify_types::Result<()> {
        self.set_key(key, value)
    }
}

fn merge_fields(target: &impl Fields, source: &Record) -> MergeResult<()> {
    for key in source.string_keys() {
        merge_field(target, source, key)?;
    }
    for key in source.symbol_keys() {
        merge_field(target, source, key)?;
    }
    Ok(())
}

// No borrow of either record is held across the recursive call, so a
// record may be merged into itself.
fn merge_field(target: &impl Fields, source: &Record, key: PropertyKey) -> MergeResult<()> {
    let incoming = source.get_own(&key).unwrap_or(Value::Absent);
    let merged = merge(target.read(&key), incoming)?;
    target.write(key, merged)?;
    Ok(())
}

fn union(target: &SetValue, source: &SetValue) -> MergeResult<()> {
    for value in source.values()? {
        target.add(value)?;
    }
    Ok(())
}

fn merge_entries(target: &MapValue, source: &MapValue) -> MergeResult<()> {
    for (key, value) in source.entries()? {
        let current = target.get(&key)?;
        let merged = merge(current, value)?;
        target.set(key, merged)?;
    }
    Ok(())
}
