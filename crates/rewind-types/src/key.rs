use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A key in a [`Map`](crate::Map).
///
/// Keys are strings. Numeric keys are normalised to their decimal form, so
/// `Key::from(1)` and `Key::from("1")` name the same entry.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Create a key from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?})", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

macro_rules! numeric_key {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(index: $ty) -> Self {
                    Self(index.to_string())
                }
            }
        )*
    };
}

numeric_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
