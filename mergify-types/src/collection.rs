//! Set-like and map-like containers.
//!
//! Any type implementing [`SetLike`] or [`MapLike`] can be wrapped in a
//! [`Value`] and is merged as that container kind. Elements and keys are
//! compared by identity through [`Element`]: scalars by value, containers,
//! functions and opaque values by handle.

use crate::{Result, Value};
use indexmap::{IndexMap, IndexSet};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use uuid::Uuid;

/// A value used as a set element or map key.
///
/// Equality is identity based: `-0.0` equals `0.0`, `NaN` equals `NaN`,
/// strings compare by content, symbols and handles by identity.
#[derive(Clone)]
pub struct Element(Value);

#[derive(PartialEq, Eq, Hash)]
enum Identity<'a> {
    Absent,
    Null,
    Bool(bool),
    Number(u64),
    String(&'a str),
    Symbol(Uuid),
    Handle(*const ()),
}

impl Element {
    /// Wraps a value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Unwraps the value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    fn identity(&self) -> Identity<'_> {
        match &self.0 {
            Value::Absent => Identity::Absent,
            Value::Null => Identity::Null,
            Value::Bool(b) => Identity::Bool(*b),
            Value::Number(n) => Identity::Number(number_bits(*n)),
            Value::String(s) => Identity::String(&**s),
            Value::Symbol(sym) => Identity::Symbol(sym.id()),
            Value::Function(f) => Identity::Handle(f.addr()),
            Value::Opaque(o) => Identity::Handle(o.addr()),
            Value::Record(r) => Identity::Handle(r.addr()),
            Value::Sequence(s) => Identity::Handle(s.addr()),
            Value::Set(s) => Identity::Handle(s.addr()),
            Value::Map(m) => Identity::Handle(m.addr()),
        }
    }
}

fn number_bits(n: f64) -> u64 {
    if n == 0.0 {
        0.0f64.to_bits()
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A container that can add elements and iterate over them.
pub trait SetLike: fmt::Debug {
    /// Adds an element. Adding an element already present is a no-op.
    fn add(&mut self, value: Value) -> Result<()>;

    /// Returns the elements in iteration order.
    fn values(&self) -> Result<Vec<Value>>;

    /// Returns true if the element is present.
    fn has(&self, value: &Value) -> bool;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A container that maps keys to values.
pub trait MapLike: fmt::Debug {
    /// Returns the value for `key`, or [`Value::Absent`] if there is none.
    fn get(&self, key: &Value) -> Result<Value>;

    /// Stores `value` under `key`, replacing any previous value in place.
    fn set(&mut self, key: Value, value: Value) -> Result<()>;

    /// Returns the `(key, value)` pairs in iteration order.
    fn entries(&self) -> Result<Vec<(Value, Value)>>;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns true if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SetLike for IndexSet<Element> {
    fn add(&mut self, value: Value) -> Result<()> {
        self.insert(Element(value));
        Ok(())
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(self.iter().map(|e| e.0.clone()).collect())
    }

    fn has(&self, value: &Value) -> bool {
        self.contains(&Element(value.clone()))
    }

    fn len(&self) -> usize {
        IndexSet::len(self)
    }
}

impl SetLike for HashSet<Element> {
    fn add(&mut self, value: Value) -> Result<()> {
        self.insert(Element(value));
        Ok(())
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(self.iter().map(|e| e.0.clone()).collect())
    }

    fn has(&self, value: &Value) -> bool {
        self.contains(&Element(value.clone()))
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl MapLike for IndexMap<Element, Value> {
    fn get(&self, key: &Value) -> Result<Value> {
        Ok(IndexMap::get(self, &Element(key.clone()))
            .cloned()
            .unwrap_or(Value::Absent))
    }

    fn set(&mut self, key: Value, value: Value) -> Result<()> {
        self.insert(Element(key), value);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(Value, Value)>> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.0.clone(), v.clone()))
            .collect())
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }
}

impl MapLike for HashMap<Element, Value> {
    fn get(&self, key: &Value) -> Result<Value> {
        Ok(HashMap::get(self, &Element(key.clone()))
            .cloned()
            .unwrap_or(Value::Absent))
    }

    fn set(&mut self, key: Value, value: Value) -> Result<()> {
        self.insert(Element(key), value);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(Value, Value)>> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.0.clone(), v.clone()))
            .collect())
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

/// A shared handle to a set-like container.
#[derive(Clone)]
pub struct SetValue(Rc<RefCell<dyn SetLike>>);

impl SetValue {
    /// Creates an empty insertion-ordered set.
    #[must_use]
    pub fn new() -> Self {
        Self::from_container(IndexSet::<Element>::new())
    }

    /// Wraps any set-like container.
    #[must_use]
    pub fn from_container<S: SetLike + 'static>(container: S) -> Self {
        Self(Rc::new(RefCell::new(container)))
    }

    /// Adds an element.
    pub fn add(&self, value: impl Into<Value>) -> Result<()> {
        self.0.borrow_mut().add(value.into())
    }

    /// Returns the elements in iteration order.
    pub fn values(&self) -> Result<Vec<Value>> {
        self.0.borrow().values()
    }

    /// Returns true if the element is present.
    #[must_use]
    pub fn has(&self, value: &Value) -> bool {
        self.0.borrow().has(value)
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if the set has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns true if both handles point at the same container.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl Default for SetValue {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Into<Value>> FromIterator<V> for SetValue {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let set: IndexSet<Element> = iter.into_iter().map(|v| Element(v.into())).collect();
        Self::from_container(set)
    }
}

impl fmt::Debug for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Set ")?;
        match self.values() {
            Ok(values) => f.debug_set().entries(values).finish(),
            Err(err) => write!(f, "<{err}>"),
        }
    }
}

/// A shared handle to a map-like container.
#[derive(Clone)]
pub struct MapValue(Rc<RefCell<dyn MapLike>>);

impl MapValue {
    /// Creates an empty insertion-ordered map.
    #[must_use]
    pub fn new() -> Self {
        Self::from_container(IndexMap::<Element, Value>::new())
    }

    /// Wraps any map-like container.
    #[must_use]
    pub fn from_container<M: MapLike + 'static>(container: M) -> Self {
        Self(Rc::new(RefCell::new(container)))
    }

    /// Returns the value for `key`, or [`Value::Absent`].
    pub fn get(&self, key: &Value) -> Result<Value> {
        self.0.borrow().get(key)
    }

    /// Stores a value under `key`.
    pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        self.0.borrow_mut().set(key.into(), value.into())
    }

    /// Returns the entries in iteration order.
    pub fn entries(&self) -> Result<Vec<(Value, Value)>> {
        self.0.borrow().entries()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns true if both handles point at the same container.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl Default for MapValue {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map: IndexMap<Element, Value> = iter
            .into_iter()
            .map(|(k, v)| (Element(k.into()), v.into()))
            .collect();
        Self::from_container(map)
    }
}

impl fmt::Debug for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Map ")?;
        match self.entries() {
            Ok(entries) => f.debug_map().entries(entries).finish(),
            Err(err) => write!(f, "<{err}>"),
        }
    }
}
