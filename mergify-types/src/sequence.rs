//! Ordered sequences.
//!
//! A sequence is a run of slots, each holding a value or a hole, plus named
//! properties for keys that are not array indices. Slots are stored
//! sparsely: a sequence's length costs nothing, only present values do.

use crate::{Error, Property, PropertyKey, Result, Value};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// The key that reads and writes a sequence's length.
const LENGTH: &str = "length";

/// Largest sequence length (2^32 - 1).
const MAX_LEN: f64 = 4_294_967_295.0;

#[derive(Default)]
struct SequenceData {
    len: usize,
    items: BTreeMap<usize, Value>,
    props: IndexMap<PropertyKey, Property>,
}

/// A shared handle to an ordered sequence.
///
/// Cloning the handle aliases the same sequence.
#[derive(Clone, Default)]
pub struct Sequence(Rc<RefCell<SequenceData>>);

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence of `len` holes.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self(Rc::new(RefCell::new(SequenceData {
            len,
            ..SequenceData::default()
        })))
    }

    /// Creates a sequence from raw slots (`None` is a hole).
    #[must_use]
    pub fn from_slots(slots: Vec<Option<Value>>) -> Self {
        let seq = Self::with_len(slots.len());
        {
            let mut data = seq.0.borrow_mut();
            for (index, slot) in slots.into_iter().enumerate() {
                if let Some(value) = slot {
                    data.items.insert(index, value);
                }
            }
        }
        seq
    }

    /// Returns the number of slots, holes included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len
    }

    /// Returns true if the sequence has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value at `index`; holes and out-of-range indices read as
    /// [`Value::Absent`].
    #[must_use]
    pub fn get(&self, index: usize) -> Value {
        self.0
            .borrow()
            .items
            .get(&index)
            .cloned()
            .unwrap_or(Value::Absent)
    }

    /// Returns true if `index` is within bounds and holds no value.
    #[must_use]
    pub fn is_hole(&self, index: usize) -> bool {
        let data = self.0.borrow();
        index < data.len && !data.items.contains_key(&index)
    }

    /// Stores `value` at `index`, extending the sequence with holes if needed.
    pub fn set_index(&self, index: usize, value: impl Into<Value>) {
        let mut data = self.0.borrow_mut();
        data.items.insert(index, value.into());
        data.len = data.len.max(index + 1);
    }

    /// Appends a value.
    pub fn push(&self, value: impl Into<Value>) {
        let mut data = self.0.borrow_mut();
        let index = data.len;
        data.items.insert(index, value.into());
        data.len += 1;
    }

    /// Truncates or extends the sequence; new slots are holes.
    pub fn set_len(&self, len: usize) {
        let mut data = self.0.borrow_mut();
        let _ = data.items.split_off(&len);
        data.len = len;
    }

    /// Returns a snapshot of every slot.
    ///
    /// This allocates one entry per slot, holes included; use
    /// [`Sequence::entries`] for long sparse sequences.
    #[must_use]
    pub fn slots(&self) -> Vec<Option<Value>> {
        let data = self.0.borrow();
        let mut slots = vec![None; data.len];
        for (&index, value) in &data.items {
            slots[index] = Some(value.clone());
        }
        slots
    }

    /// Returns a snapshot of the values, holes read as [`Value::Absent`].
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.slots()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    }

    /// The occupied slots as `(index, value)` pairs, in index order.
    #[must_use]
    pub fn entries(&self) -> Vec<(usize, Value)> {
        self.0
            .borrow()
            .items
            .iter()
            .map(|(&index, value)| (index, value.clone()))
            .collect()
    }

    /// Reads a slot for index keys, the length for `"length"`, a named
    /// property otherwise.
    #[must_use]
    pub fn get_key(&self, key: &PropertyKey) -> Value {
        if let Some(index) = key.as_index() {
            return self.get(index);
        }
        if key.as_str() == Some(LENGTH) {
            return Value::Number(self.len() as f64);
        }
        self.0
            .borrow()
            .props
            .get(key)
            .map_or(Value::Absent, |prop| prop.value.clone())
    }

    /// Writes a slot for index keys, the length for `"length"`, a named
    /// property otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if `"length"` is written with anything other
    /// than a whole number between 0 and 2^32 - 1.
    pub fn set_key(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if let Some(index) = key.as_index() {
            self.set_index(index, value);
            return Ok(());
        }
        let value = value.into();
        if key.as_str() == Some(LENGTH) {
            let len = valid_len(&value).ok_or_else(|| Error::InvalidLength(format!("{value:?}")))?;
            self.set_len(len);
            return Ok(());
        }
        let mut data = self.0.borrow_mut();
        match data.props.entry(key) {
            indexmap::map::Entry::Occupied(mut slot) => slot.get_mut().value = value,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(Property {
                    value,
                    enumerable: true,
                });
            }
        }
        Ok(())
    }

    /// Enumerable named (non-index) properties, in insertion order.
    #[must_use]
    pub fn props(&self) -> Vec<(PropertyKey, Value)> {
        self.0
            .borrow()
            .props
            .iter()
            .filter(|(_, prop)| prop.enumerable)
            .map(|(key, prop)| (key.clone(), prop.value.clone()))
            .collect()
    }

    /// Returns a new sequence holding this sequence's slots followed by
    /// `other`'s. Holes are preserved; named properties are not copied.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let offset = self.len();
        let joined = Self::with_len(offset + other.len());
        {
            let mut data = joined.0.borrow_mut();
            data.items.extend(self.entries());
            data.items.extend(
                other
                    .entries()
                    .into_iter()
                    .map(|(index, value)| (offset + index, value)),
            );
        }
        joined
    }

    /// Returns true if both handles point at the same sequence.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

fn valid_len(value: &Value) -> Option<usize> {
    let n = value.as_f64()?;
    if n.fract() != 0.0 || !(0.0..=MAX_LEN).contains(&n) {
        return None;
    }
    usize::try_from(n as u64).ok()
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let seq = Self::new();
        for value in iter {
            seq.push(value);
        }
        seq
    }
}

/// A run of consecutive holes.
struct Holes(usize);

impl fmt::Debug for Holes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => f.write_str("<hole>"),
            n => write!(f, "<{n} holes>"),
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut next = 0;
        for (index, value) in self.entries() {
            if index > next {
                list.entry(&Holes(index - next));
            }
            list.entry(&value);
            next = index + 1;
        }
        let len = self.len();
        if len > next {
            list.entry(&Holes(len - next));
        }
        list.finish()?;
        let props = self.props();
        if !props.is_empty() {
            f.write_str(" ")?;
            f.debug_map().entries(props).finish()?;
        }
        Ok(())
    }
}
