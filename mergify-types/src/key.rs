//! Property keys and symbols.
//!
//! Symbols use UUIDs for identity: v7 for fresh symbols, v5 (derived from
//! the key text) for registered symbols so equal keys yield equal symbols.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use uuid::Uuid;

/// Namespace for registered symbol UUIDs.
const SYMBOL_REGISTRY: Uuid = Uuid::from_u128(0x6d65_7267_6966_7973_796d_626f_6c73_0001);

/// Largest valid array index plus one (2^32 - 1).
const MAX_INDEX_EXCLUSIVE: u64 = u32::MAX as u64;

/// A unique, non-string property key.
///
/// Two symbols are equal only if they share an identity; the description
/// is informational.
#[derive(Clone)]
pub struct Symbol {
    id: Uuid,
    description: Option<Rc<str>>,
}

impl Symbol {
    /// Creates a fresh symbol, distinct from every other symbol.
    #[must_use]
    pub fn new(description: impl Into<Option<&'static str>>) -> Self {
        Self {
            id: Uuid::now_v7(),
            description: description.into().map(Rc::from),
        }
    }

    /// Returns the registered symbol for `key`.
    ///
    /// Every call with the same key returns an equal symbol.
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        Self {
            id: Uuid::new_v5(&SYMBOL_REGISTRY, key.as_bytes()),
            description: Some(Rc::from(key)),
        }
    }

    /// Returns the symbol's identity.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the description given at creation, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A property key: either a string or a symbol.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(Rc<str>),
    Symbol(Symbol),
}

impl PropertyKey {
    /// Returns true for symbol keys.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Returns the key text for string keys.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Symbol(_) => None,
        }
    }

    /// Interprets the key as a sequence index.
    ///
    /// Only canonical decimal strings below 2^32 - 1 qualify: `"0"` and
    /// `"17"` do, `"017"`, `"-1"` and `"1.5"` do not.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        let text = self.as_str()?;
        parse_index(text)
    }
}

fn parse_index(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    let index: u64 = text.parse().ok()?;
    if index >= MAX_INDEX_EXCLUSIVE {
        return None;
    }
    usize::try_from(index).ok()
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::String(Rc::from(s))
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        Self::String(Rc::from(s))
    }
}

impl From<usize> for PropertyKey {
    fn from(index: usize) -> Self {
        Self::String(Rc::from(index.to_string()))
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Symbol> for PropertyKey {
    fn from(symbol: &Symbol) -> Self {
        Self::Symbol(symbol.clone())
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(sym) => write!(f, "[{sym:?}]"),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Symbol(sym) => write!(f, "{sym}"),
        }
    }
}
