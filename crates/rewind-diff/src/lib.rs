//! Diff engine for Rewind.
//!
//! Computes structural diffs between two [`Value`](rewind_types::Value)s and
//! replays them forward or backward to reconstruct neighbouring states.
//!
//! # Key Types
//!
//! - [`Diff`] -- Either a [`PrimitiveDiff`] (leaf change) or an [`ObjectDiff`] (per-key changes)
//! - [`Direction`] -- Which side of each leaf [`apply_diff`] materialises
//! - [`LeafChange`] / [`ChangeKind`] -- Flattened view of the changed leaves
//!
//! ```
//! use rewind_diff::{apply_diff, diff, Direction};
//! use rewind_types::Value;
//! use serde_json::json;
//!
//! let a = Value::from(json!({"person": {"age": 45, "name": "Jack"}}));
//! let b = Value::from(json!({"person": {"age": 45, "name": "Jim"}}));
//!
//! let d = diff(&a, &b);
//! assert_eq!(apply_diff(&a, d.as_ref(), Direction::Forward), b);
//! assert_eq!(apply_diff(&b, d.as_ref(), Direction::Backward), a);
//! ```

pub mod error;
pub mod patch;
pub mod state_diff;
pub mod wire;

pub use error::{DiffError, DiffResult};
pub use patch::{apply_backward, apply_diff, apply_forward, Direction};
pub use state_diff::{diff, ChangeKind, Diff, LeafChange, ObjectDiff, PrimitiveDiff};
pub use wire::LEAF_MARKER;
