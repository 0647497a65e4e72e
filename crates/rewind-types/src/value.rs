//! The dynamic value model.
//!
//! [`Value`] covers everything a piece of observed application state can
//! hold. Primitives compare by value, mappings by structure, and lists,
//! functions, and symbols by identity.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::handle::{Function, List, Symbol};
use crate::key::Key;

static UNDEFINED: Value = Value::Undefined;

/// A dynamically shaped value.
///
/// `PartialEq` is *deep structural* equality: lists compare element-wise,
/// mappings key-wise, and functions and symbols by identity. Use
/// [`Value::strict_eq`] for the identity comparison the diff engine uses.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
    List(List),
    Function(Function),
    Map(Map),
}

impl Value {
    /// Short name of the variant, used in logs and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Map(_) => "map",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns `true` only for keyed mappings. `Null`, lists, and functions
    /// are never mappings.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Look up `key` in a mapping. Missing keys, and every key of a
    /// non-mapping, read as `Undefined`.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Value::Map(map) => map.get(key),
            _ => &UNDEFINED,
        }
    }

    /// Strict equality: value equality for primitives, identity for lists,
    /// functions, and symbols.
    ///
    /// Numbers follow IEEE-754, so `NaN` is not strictly equal to itself.
    /// Mappings have value semantics in this model and compare structurally.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => a.ptr_eq(b) || a.as_slice() == b.as_slice(),
            _ => self.strict_eq(other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

macro_rules! number_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_value!(f32, i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(List::new(items))
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

/// A keyed mapping from [`Key`] to [`Value`].
///
/// A `Map` never stores `Undefined`: inserting `Undefined` removes the key,
/// so an absent key and a key holding `Undefined` are the same state.
/// Iteration is in key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Map {
    entries: BTreeMap<Key, Value>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value under `key`, or `Undefined` if absent.
    pub fn get(&self, key: &str) -> &Value {
        self.entries.get(key).unwrap_or(&UNDEFINED)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `value` under `key`, returning the previous value.
    /// Storing `Undefined` removes the key.
    pub fn insert(&mut self, key: impl Into<Key>, value: Value) -> Value {
        let key = key.into();
        let previous = if value.is_undefined() {
            self.entries.remove(key.as_str())
        } else {
            self.entries.insert(key, value)
        };
        previous.unwrap_or_default()
    }

    pub fn remove(&mut self, key: &str) -> Value {
        self.entries.remove(key).unwrap_or_default()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Key, Value> {
        self.entries.iter()
    }
}

impl<K: Into<Key>> FromIterator<(K, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Key, &'a Value);
    type IntoIter = btree_map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Map {
    type Item = (Key, Value);
    type IntoIter = btree_map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
