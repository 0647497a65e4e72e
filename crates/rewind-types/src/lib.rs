//! Value model for Rewind.
//!
//! This crate provides the dynamically shaped values that the diff engine
//! compares and patches. Every other Rewind crate depends on `rewind-types`.
//!
//! # Key Types
//!
//! - [`Value`] — Any observed state: primitive, list, function, symbol, or mapping
//! - [`Map`] — Keyed mapping with structural equality
//! - [`Key`] — Mapping key (numeric keys normalise to strings)
//! - [`List`] / [`Function`] / [`Symbol`] — Handles compared by identity

pub mod error;
pub mod handle;
pub mod json;
pub mod key;
pub mod value;

pub use error::TypeError;
pub use handle::{Function, List, Symbol};
pub use key::Key;
pub use value::{Map, Value};
