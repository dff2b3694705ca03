//! Value-kind classification.
//!
//! Every merge step classifies both operands once and dispatches on the
//! pair of kinds.

use mergify_types::Value;

/// The kind of a value, as far as merging is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The absence marker.
    Absent,
    /// Explicit null.
    Null,
    /// Booleans, numbers, strings and symbols.
    Scalar,
    /// A plain data record (no class lineage).
    Record,
    /// An ordered sequence.
    Sequence,
    /// Any set-like container.
    SetLike,
    /// Any map-like container.
    MapLike,
    /// Functions, class instances and host values: never traversed.
    Opaque,
}

impl Kind {
    /// Classifies a value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Absent => Self::Absent,
            Value::Null => Self::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Symbol(_) => {
                Self::Scalar
            }
            Value::Record(record) if record.is_plain() => Self::Record,
            Value::Record(_) | Value::Function(_) | Value::Opaque(_) => Self::Opaque,
            Value::Sequence(_) => Self::Sequence,
            Value::Set(_) => Self::SetLike,
            Value::Map(_) => Self::MapLike,
        }
    }
}

/// Returns true if `value` is a plain data record: built as a record
/// literal or without a prototype, never as a class instance.
#[must_use]
pub fn is_plain_record(value: &Value) -> bool {
    Kind::of(value) == Kind::Record
}
