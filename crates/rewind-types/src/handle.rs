//! Identity-bearing handles: lists, functions, and symbols.
//!
//! These values are shared by reference. Cloning a handle yields the *same*
//! value (same allocation), while constructing a new handle from equal
//! contents yields a *different* one. [`ptr_eq`](List::ptr_eq) is the
//! identity test the diff engine relies on.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::value::Value;

/// An ordered list of values with reference identity.
#[derive(Clone, Default)]
pub struct List(Arc<Vec<Value>>);

impl List {
    /// Allocate a new list. The result is distinct from every other list.
    pub fn new(items: Vec<Value>) -> Self {
        Self(Arc::new(items))
    }

    /// Returns `true` if both handles point at the same list.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Copy the items into a freshly allocated list.
    pub fn to_new_list(&self) -> Self {
        Self::new(self.0.to_vec())
    }
}

impl Deref for List {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

type Callable = dyn Fn(&[Value]) -> Value + Send + Sync;

struct FunctionInner {
    name: String,
    call: Box<Callable>,
}

/// A callable value with reference identity.
///
/// Two functions are the same value only if one is a clone of the other;
/// behaviourally identical closures wrapped separately are different values.
#[derive(Clone)]
pub struct Function(Arc<FunctionInner>);

impl Function {
    pub fn new<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(FunctionInner {
            name: name.into(),
            call: Box::new(call),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0.call)(args)
    }

    /// Returns `true` if both handles refer to the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.0.name)
    }
}

/// A unique symbol. Every call to [`Symbol::new`] produces a distinct value,
/// even for equal descriptions.
#[derive(Clone)]
pub struct Symbol(Arc<Option<String>>);

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self(Arc::new(Some(description.into())))
    }

    pub fn anonymous() -> Self {
        Self(Arc::new(None))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(desc) => write!(f, "Symbol({desc})"),
            None => f.write_str("Symbol()"),
        }
    }
}
