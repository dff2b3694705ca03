//! Deep merge for dynamic values.
//!
//! This crate merges [`Value`]s recursively:
//!
//! - plain records are merged key by key, in place
//! - sequences are concatenated into a new sequence
//! - set-like containers are unioned, in place
//! - map-like containers are merged entry by entry, in place
//! - everything else (scalars, functions, class instances, opaque values)
//!   is replaced by the incoming value
//!
//! Entry points:
//!
//! - [`merge_all`] / [`merge_all!`]: fold any number of values
//! - [`merge`]: merge one value into another
//! - [`is_plain_record`] / [`Kind`]: the classification the merge uses
//!
//! The merge laws callers can rely on:
//! - **Absence is neutral**: `merge(x, Absent) == x`
//! - **Null overrides**: `merge(x, Null) == Null`, `merge(Null, y) == y`
//! - **Left fold**: `merge_all([a, b, c]) == merge(merge(a, b), c)`
//!
//! Results alias their inputs; see [`merge`].

mod classify;
mod engine;
mod error;
mod fold;

pub use classify::{Kind, is_plain_record};
pub use engine::merge;
pub use error::{MergeError, MergeResult};
pub use fold::merge_all;

pub use mergify_types::{
    Class, Element, Function, Lineage, MapLike, MapValue, Opaque, Property, PropertyKey, Record,
    Sequence, SetLike, SetValue, Symbol, Value,
};

/// Merges any number of values, converting each with `Into<Value>`.
///
/// `merge_all!(a, b, c)` is `merge_all([a.into(), b.into(), c.into()])`.
/// With no arguments it returns [`MergeError::EmptyFold`].
#[macro_export]
macro_rules! merge_all {
    () => {
        $crate::merge_all(::core::iter::empty::<$crate::Value>())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::merge_all([$(::core::convert::Into::<$crate::Value>::into($value)),+])
    };
}
