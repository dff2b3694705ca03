//! Key→property records.
//!
//! A record's [`Lineage`] says how it was built: without any prototype
//! ([`Lineage::Bare`]), as an ordinary record literal ([`Lineage::Root`]), or
//! as an instance of a user-defined [`Class`]. Only the first two are plain
//! data records.

use crate::{PropertyKey, Value};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A user-defined class: a name plus prototype defaults shared by every
/// instance.
#[derive(Debug)]
pub struct Class {
    name: String,
    prototype: IndexMap<PropertyKey, Value>,
}

impl Class {
    /// Creates a class with an empty prototype.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prototype: IndexMap::new(),
        }
    }

    /// Adds a prototype default, visible through [`Record::get`] on instances
    /// that have no own property of that name.
    #[must_use]
    pub fn with_default(mut self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Self {
        self.prototype.insert(key.into(), value.into());
        self
    }

    /// Returns the class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a prototype default.
    #[must_use]
    pub fn default_for(&self, key: &PropertyKey) -> Option<&Value> {
        self.prototype.get(key)
    }
}

/// How a record was constructed.
#[derive(Debug, Clone)]
pub enum Lineage {
    /// No prototype at all (a dictionary).
    Bare,
    /// An ordinary record literal.
    Root,
    /// An instance of a user-defined class.
    Class(Rc<Class>),
}

impl Lineage {
    /// Returns true for the lineages of plain data records.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Bare | Self::Root)
    }

    /// Returns the class for instance lineages.
    #[must_use]
    pub fn class(&self) -> Option<&Rc<Class>> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Plain lineages share a shape; class lineages match only the same class.
    pub(crate) fn same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Class(a), Self::Class(b)) => Rc::ptr_eq(a, b),
            (a, b) => a.is_plain() && b.is_plain(),
        }
    }
}

/// An own property slot.
#[derive(Debug, Clone)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

struct RecordData {
    lineage: Lineage,
    props: IndexMap<PropertyKey, Property>,
}

/// A shared handle to a record.
///
/// Cloning the handle aliases the same record.
#[derive(Clone)]
pub struct Record(Rc<RefCell<RecordData>>);

impl Record {
    fn with_lineage(lineage: Lineage) -> Self {
        Self(Rc::new(RefCell::new(RecordData {
            lineage,
            props: IndexMap::new(),
        })))
    }

    /// Creates an empty record literal.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lineage(Lineage::Root)
    }

    /// Creates an empty record with no prototype.
    #[must_use]
    pub fn bare() -> Self {
        Self::with_lineage(Lineage::Bare)
    }

    /// Creates an empty instance of `class`.
    #[must_use]
    pub fn instance(class: &Rc<Class>) -> Self {
        Self::with_lineage(Lineage::Class(Rc::clone(class)))
    }

    /// An empty record with the same lineage as `other`.
    pub(crate) fn like(other: &Self) -> Self {
        Self::with_lineage(other.lineage())
    }

    /// Builder form of [`Record::set`].
    #[must_use]
    pub fn with(self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the record's lineage.
    #[must_use]
    pub fn lineage(&self) -> Lineage {
        self.0.borrow().lineage.clone()
    }

    /// Returns true if this is a plain data record.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.0.borrow().lineage.is_plain()
    }

    /// Looks up a property, falling back to class prototype defaults.
    ///
    /// Missing properties read as [`Value::Absent`].
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Value {
        let data = self.0.borrow();
        if let Some(prop) = data.props.get(key) {
            return prop.value.clone();
        }
        data.lineage
            .class()
            .and_then(|class| class.default_for(key).cloned())
            .unwrap_or(Value::Absent)
    }

    /// Returns an own property value, enumerable or not.
    #[must_use]
    pub fn get_own(&self, key: &PropertyKey) -> Option<Value> {
        self.0.borrow().props.get(key).map(|prop| prop.value.clone())
    }

    /// Assigns a property.
    ///
    /// New properties are enumerable and appended; existing ones keep their
    /// position and enumerability.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) {
        let value = value.into();
        let mut data = self.0.borrow_mut();
        match data.props.entry(key.into()) {
            indexmap::map::Entry::Occupied(mut slot) => slot.get_mut().value = value,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(Property {
                    value,
                    enumerable: true,
                });
            }
        }
    }

    /// Defines a property with explicit enumerability.
    pub fn define(&self, key: impl Into<PropertyKey>, value: impl Into<Value>, enumerable: bool) {
        self.0.borrow_mut().props.insert(
            key.into(),
            Property {
                value: value.into(),
                enumerable,
            },
        );
    }

    /// Returns true if the record has an own property `key`.
    #[must_use]
    pub fn contains_key(&self, key: &PropertyKey) -> bool {
        self.0.borrow().props.contains_key(key)
    }

    /// Returns true if the own property `key` exists and is enumerable.
    #[must_use]
    pub fn is_enumerable(&self, key: &PropertyKey) -> bool {
        self.0
            .borrow()
            .props
            .get(key)
            .is_some_and(|prop| prop.enumerable)
    }

    /// Enumerable own string keys, in insertion order.
    #[must_use]
    pub fn string_keys(&self) -> Vec<PropertyKey> {
        self.enumerable_keys(false)
    }

    /// Enumerable own symbol keys, in insertion order.
    #[must_use]
    pub fn symbol_keys(&self) -> Vec<PropertyKey> {
        self.enumerable_keys(true)
    }

    fn enumerable_keys(&self, symbols: bool) -> Vec<PropertyKey> {
        self.0
            .borrow()
            .props
            .iter()
            .filter(|(key, prop)| prop.enumerable && key.is_symbol() == symbols)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// All enumerable own keys: string keys first, then symbol keys.
    #[must_use]
    pub fn keys(&self) -> Vec<PropertyKey> {
        let mut keys = self.string_keys();
        keys.extend(self.symbol_keys());
        keys
    }

    /// Enumerable own entries, ordered like [`Record::keys`].
    #[must_use]
    pub fn entries(&self) -> Vec<(PropertyKey, Value)> {
        self.keys()
            .into_iter()
            .map(|key| {
                let value = self.get_own(&key).unwrap_or(Value::Absent);
                (key, value)
            })
            .collect()
    }

    /// Every own property including non-enumerable ones, in storage order.
    #[must_use]
    pub fn properties(&self) -> Vec<(PropertyKey, Property)> {
        self.0
            .borrow()
            .props
            .iter()
            .map(|(key, prop)| (key.clone(), prop.clone()))
            .collect()
    }

    /// Returns the number of enumerable own properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0
            .borrow()
            .props
            .values()
            .filter(|prop| prop.enumerable)
            .count()
    }

    /// Returns true if the record has no enumerable own properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if both handles point at the same record.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<PropertyKey>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let record = Self::new();
        for (key, value) in iter {
            record.set(key, value);
        }
        record
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(class) = self.lineage().class() {
            write!(f, "{} ", class.name())?;
        }
        f.debug_map().entries(self.entries()).finish()
    }
}
