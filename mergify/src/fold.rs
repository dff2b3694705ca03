//! Variadic merge as a left fold.

use crate::{MergeError, MergeResult, merge};
use mergify_types::Value;
use tracing::debug;

/// Merges every value into the first, left to right.
///
/// `merge_all([a, b, c])` is `merge(merge(a, b)?, c)`. A single value is
/// returned unchanged.
///
/// # Errors
///
/// [`MergeError::EmptyFold`] if `values` is empty; otherwise any error from
/// [`merge`].
pub fn merge_all<I>(values: I) -> MergeResult<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut values = values.into_iter();
    let first = values.next().ok_or(MergeError::EmptyFold)?;
    let mut count = 1usize;
    let merged = values.try_fold(first, |acc, next| {
        count += 1;
        merge(acc, next)
    })?;
    debug!(count, "merged values");
    Ok(merged)
}
