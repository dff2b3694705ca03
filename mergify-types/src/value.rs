//! The dynamic [`Value`] type.

use crate::{
    Element, Function, MapValue, Opaque, PropertyKey, Record, Result, Sequence, SetValue, Symbol,
};
use std::fmt;
use std::rc::Rc;

/// A dynamically typed value.
///
/// Scalars are held inline. Every other variant is a handle: cloning it
/// aliases the same underlying container, function or host value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence marker: "not supplied", and what missing properties read as.
    #[default]
    Absent,
    /// Explicit null.
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Symbol(Symbol),
    Function(Function),
    Opaque(Opaque),
    Record(Record),
    Sequence(Sequence),
    Set(SetValue),
    Map(MapValue),
}

impl Value {
    /// Creates an empty record literal.
    #[must_use]
    pub fn record() -> Self {
        Self::Record(Record::new())
    }

    /// Creates an empty sequence.
    #[must_use]
    pub fn sequence() -> Self {
        Self::Sequence(Sequence::new())
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for `Null` and `Absent`.
    #[must_use]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Absent)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Self::Opaque(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_set(&self) -> Option<&SetValue> {
        match self {
            Self::Set(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Reads a property of a record, sequence or function.
    ///
    /// Everything else, and every missing property, reads as `Absent`.
    #[must_use]
    pub fn get(&self, key: impl Into<PropertyKey>) -> Value {
        let key = key.into();
        match self {
            Self::Record(r) => r.get(&key),
            Self::Sequence(s) => s.get_key(&key),
            Self::Function(f) => f.props().get(&key),
            _ => Value::Absent,
        }
    }

    /// Returns true if both values are the same scalar or the same handle.
    ///
    /// This is the identity used for set membership and map keys.
    #[must_use]
    pub fn is_same(&self, other: &Value) -> bool {
        Element::new(self.clone()) == Element::new(other.clone())
    }

    /// Returns a copy that shares no containers with `self`.
    ///
    /// Records keep their lineage and enumerability; sets and maps are
    /// copied into the default insertion-ordered containers. Functions and
    /// opaque values are shared, not copied. Cyclic values recurse without
    /// bound.
    pub fn deep_clone(&self) -> Result<Value> {
        Ok(match self {
            Self::Record(r) => {
                let copy = Record::like(r);
                for (key, prop) in r.properties() {
                    copy.define(key, prop.value.deep_clone()?, prop.enumerable);
                }
                Self::Record(copy)
            }
            Self::Sequence(s) => {
                let copy = Sequence::with_len(s.len());
                for (index, value) in s.entries() {
                    copy.set_index(index, value.deep_clone()?);
                }
                for (key, value) in s.props() {
                    copy.set_key(key, value.deep_clone()?)?;
                }
                Self::Sequence(copy)
            }
            Self::Set(s) => {
                let copy = SetValue::new();
                for value in s.values()? {
                    copy.add(value.deep_clone()?)?;
                }
                Self::Set(copy)
            }
            Self::Map(m) => {
                let copy = MapValue::new();
                for (key, value) in m.entries()? {
                    copy.set(key.deep_clone()?, value.deep_clone()?)?;
                }
                Self::Map(copy)
            }
            other => other.clone(),
        })
    }
}

fn records_equal(a: &Record, b: &Record) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    if !a.lineage().same_shape(&b.lineage()) || a.len() != b.len() {
        return false;
    }
    a.entries()
        .into_iter()
        .all(|(key, value)| b.is_enumerable(&key) && b.get_own(&key) == Some(value))
}

fn props_equal(a: &[(PropertyKey, Value)], b: &[(PropertyKey, Value)]) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.iter().any(|(k, v)| k == key && v == value))
}

fn sequences_equal(a: &Sequence, b: &Sequence) -> bool {
    a.ptr_eq(b)
        || (a.len() == b.len()
            && a.entries() == b.entries()
            && props_equal(&a.props(), &b.props()))
}

fn sets_equal(a: &SetValue, b: &SetValue) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    let (Ok(left), Ok(right)) = (a.values(), b.values()) else {
        return false;
    };
    left.len() == right.len()
        && left
            .iter()
            .all(|value| b.has(value) || right.iter().any(|other| other == value))
}

fn maps_equal(a: &MapValue, b: &MapValue) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    let (Ok(left), Ok(right)) = (a.entries(), b.entries()) else {
        return false;
    };
    left.len() == right.len()
        && left.iter().all(|(key, value)| {
            right
                .iter()
                .any(|(k, v)| (k.is_same(key) || k == key) && v == value)
        })
}

impl PartialEq for Value {
    /// Deep structural equality.
    ///
    /// Record keys, sets and maps compare without regard to order;
    /// non-enumerable properties are ignored; functions and opaque values
    /// compare by handle.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            (Self::Opaque(a), Self::Opaque(b)) => a.ptr_eq(b),
            (Self::Record(a), Self::Record(b)) => records_equal(a, b),
            (Self::Sequence(a), Self::Sequence(b)) => sequences_equal(a, b),
            (Self::Set(a), Self::Set(b)) => sets_equal(a, b),
            (Self::Map(a), Self::Map(b)) => maps_equal(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(sym) => fmt::Debug::fmt(sym, f),
            Self::Function(func) => fmt::Debug::fmt(func, f),
            Self::Opaque(o) => fmt::Debug::fmt(o, f),
            Self::Record(r) => fmt::Debug::fmt(r, f),
            Self::Sequence(s) => fmt::Debug::fmt(s, f),
            Self::Set(s) => fmt::Debug::fmt(s, f),
            Self::Map(m) => fmt::Debug::fmt(m, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(Rc::from(s))
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Self::Symbol(sym)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Self::Opaque(o)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl From<Sequence> for Value {
    fn from(s: Sequence) -> Self {
        Self::Sequence(s)
    }
}

impl From<SetValue> for Value {
    fn from(s: SetValue) -> Self {
        Self::Set(s)
    }
}

impl From<MapValue> for Value {
    fn from(m: MapValue) -> Self {
        Self::Map(m)
    }
}
