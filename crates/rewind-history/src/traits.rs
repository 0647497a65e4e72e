use rewind_diff::Diff;

use crate::namespace::{StateNamespace, StateNamespaces};

/// Write boundary used by state-tracking wrappers.
pub trait DiffRecorder: Send + Sync {
    /// Append `diff` to the namespace `namespace_id`, creating it if needed.
    fn record_diff(&self, namespace_id: &str, diff: Diff);
}

/// Read boundary used by inspection tools.
pub trait HistoryReader: Send + Sync {
    /// Snapshot of every namespace.
    fn namespaces(&self) -> StateNamespaces;

    fn namespace(&self, namespace_id: &str) -> Option<StateNamespace>;

    fn namespace_ids(&self) -> Vec<String>;

    /// Diffs of one namespace in insertion order; empty if it does not exist.
    fn entries(&self, namespace_id: &str) -> Vec<Diff> {
        self.namespace(namespace_id)
            .map(|ns| ns.diffs().cloned().collect())
            .unwrap_or_default()
    }

    fn entry_count(&self, namespace_id: &str) -> usize {
        self.namespace(namespace_id).map_or(0, |ns| ns.len())
    }
}
