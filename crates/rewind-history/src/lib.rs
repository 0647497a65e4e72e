//! Diff history for Rewind.
//!
//! This crate records diffs of observed state under named namespaces and
//! replays them for time travel. It provides:
//! - `DiffRecorder` / `HistoryReader` trait boundaries
//! - `HistoryStore`, an explicit in-memory store, plus a process-wide instance
//! - The export document read by external inspection tools
//! - `Timeline`, a cursor that steps backward and forward through a namespace

pub mod config;
pub mod error;
pub mod memory;
pub mod namespace;
pub mod replay;
pub mod traits;

pub use config::{HistoryConfig, DEFAULT_EXPORT_KEY};
pub use error::{HistoryError, HistoryResult};
pub use memory::HistoryStore;
pub use namespace::{StateEntry, StateNamespace, StateNamespaces};
pub use replay::Timeline;
pub use traits::{DiffRecorder, HistoryReader};
