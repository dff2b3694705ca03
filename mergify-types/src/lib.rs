//! Dynamic value model for the mergify deep-merge engine.
//!
//! This crate defines the values the merge engine operates on:
//! - [`Value`]: closed enum over scalars, records, sequences, sets, maps,
//!   functions and opaque host values
//! - [`Record`] / [`Lineage`] / [`Class`]: key→property containers and the
//!   lineage that separates plain data records from class instances
//! - [`Sequence`]: ordered slots with holes plus named properties
//! - [`SetLike`] / [`MapLike`]: capability traits for set and map containers
//! - [`PropertyKey`] / [`Symbol`]: string and symbol property keys
//!
//! Container variants are reference-counted handles: cloning a [`Value`]
//! aliases the same container. Use [`Value::deep_clone`] for an independent
//! copy.

mod collection;
mod function;
mod json;
mod key;
mod record;
mod sequence;
mod value;

pub use collection::{Element, MapLike, MapValue, SetLike, SetValue};
pub use function::{Function, Opaque};
pub use key::{PropertyKey, Symbol};
pub use record::{Class, Lineage, Property, Record};
pub use sequence::Sequence;
pub use value::Value;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in value operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A set-like or map-like container rejected an operation.
    #[error("{operation} failed: {message}")]
    Capability {
        operation: &'static str,
        message: String,
    },

    /// A sequence length was set to something other than a valid length.
    #[error("invalid sequence length: {0}")]
    InvalidLength(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a container capability failure.
    pub fn capability(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Capability {
            operation,
            message: message.into(),
        }
    }
}
