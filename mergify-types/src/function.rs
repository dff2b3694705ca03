//! Opaque values: callables and host objects.
//!
//! Neither kind is ever traversed by a merge; they are replaced wholesale.

use crate::{Record, Value};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

type Callable = dyn Fn(&[Value]) -> Value;

struct FunctionData {
    name: String,
    call: Box<Callable>,
    props: Record,
}

/// A callable value with its own attached properties.
///
/// Cloning the handle aliases the same function.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    /// Creates a named function.
    pub fn new<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self(Rc::new(FunctionData {
            name: name.into(),
            call: Box::new(call),
            props: Record::new(),
        }))
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Invokes the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0.call)(args)
    }

    /// Properties attached to the function itself.
    #[must_use]
    pub fn props(&self) -> &Record {
        &self.0.props
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.0.name)
    }
}

/// An arbitrary host value the merge never looks inside.
#[derive(Clone)]
pub struct Opaque {
    inner: Rc<dyn Any>,
    type_name: &'static str,
}

impl Opaque {
    /// Wraps a host value.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the Rust type name of the wrapped value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrows the wrapped value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.inner) as *const ()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Opaque: {}]", self.type_name)
    }
}
