//! Recorded history: entries grouped into named namespaces.
//!
//! The serialized field names (`stateNamespaces`, `stateEntries`, `diff`)
//! are part of the export contract read by external tools.

use std::collections::BTreeMap;

use rewind_diff::Diff;
use serde::{Deserialize, Serialize};

/// One recorded diff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub diff: Diff,
}

impl StateEntry {
    pub fn new(diff: Diff) -> Self {
        Self { diff }
    }
}

/// The ordered history of one piece of observed state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateNamespace {
    pub state_entries: Vec<StateEntry>,
}

impl StateNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diff: Diff) {
        self.state_entries.push(StateEntry::new(diff));
    }

    pub fn len(&self) -> usize {
        self.state_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state_entries.is_empty()
    }

    /// Diffs in insertion order.
    pub fn diffs(&self) -> impl Iterator<Item = &Diff> + '_ {
        self.state_entries.iter().map(|entry| &entry.diff)
    }
}

/// All namespaces, keyed by namespace id.
pub type StateNamespaces = BTreeMap<String, StateNamespace>;
