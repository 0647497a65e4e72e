//! In-memory diff history.
//!
//! [`HistoryStore`] keeps every namespace in a `BTreeMap` behind a `RwLock`.
//! Namespaces are created on first write and never pruned; the history grows
//! for as long as the store lives.

use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rewind_diff::{diff, Diff};
use rewind_types::Value;
use tracing::debug;

use crate::config::HistoryConfig;
use crate::error::{HistoryError, HistoryResult};
use crate::namespace::{StateNamespace, StateNamespaces};
use crate::replay::Timeline;
use crate::traits::{DiffRecorder, HistoryReader};

static GLOBAL: OnceLock<HistoryStore> = OnceLock::new();

/// Namespace-keyed, append-only log of diffs.
///
/// Writers sharing a namespace id interleave their entries in call order.
#[derive(Debug, Default)]
pub struct HistoryStore {
    config: HistoryConfig,
    namespaces: RwLock<StateNamespaces>,
}

impl HistoryStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config,
            namespaces: RwLock::new(StateNamespaces::new()),
        }
    }

    /// The process-wide store. This is the single well-known location
    /// external readers can rely on.
    ///
    /// Created on first use with the default configuration unless
    /// [`HistoryStore::init_global`] ran first.
    pub fn global() -> &'static HistoryStore {
        GLOBAL.get_or_init(HistoryStore::new)
    }

    /// Install the process-wide store with `config`.
    ///
    /// Returns `false`, leaving the existing store in place, if the global
    /// store was already installed or already used.
    pub fn init_global(config: HistoryConfig) -> bool {
        let installed = GLOBAL.set(Self::with_config(config)).is_ok();
        if !installed {
            debug!("global history store already initialised");
        }
        installed
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Diff `before` against `after` and record the result under
    /// `namespace_id`. Returns `true` if a diff was recorded; equal values
    /// record nothing.
    pub fn record_transition(&self, namespace_id: &str, before: &Value, after: &Value) -> bool {
        match diff(before, after) {
            Some(d) => {
                self.record_diff(namespace_id, d);
                true
            }
            None => false,
        }
    }

    /// Build a [`Timeline`] over `namespace_id`, taking `current` as the
    /// state reached after its latest entry.
    pub fn timeline(&self, namespace_id: &str, current: Value) -> Timeline {
        Timeline::new(current, self.entries(namespace_id))
    }

    /// The export document external tools read:
    /// `{ <export_key>: { "stateNamespaces": { <id>: { "stateEntries": [...] } } } }`.
    pub fn export(&self) -> HistoryResult<serde_json::Value> {
        let namespaces = serde_json::to_value(&*self.read())
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;

        let mut inner = serde_json::Map::new();
        inner.insert("stateNamespaces".to_string(), namespaces);

        let mut document = serde_json::Map::new();
        document.insert(
            self.config.export_key.clone(),
            serde_json::Value::Object(inner),
        );
        Ok(serde_json::Value::Object(document))
    }

    // The log is append-only, so a guard recovered from a poisoned lock
    // still holds a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, StateNamespaces> {
        self.namespaces.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StateNamespaces> {
        self.namespaces.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiffRecorder for HistoryStore {
    fn record_diff(&self, namespace_id: &str, diff: Diff) {
        let mut namespaces = self.write();
        let namespace = namespaces.entry(namespace_id.to_string()).or_default();
        namespace.push(diff);

        if self.config.log_records {
            debug!(namespace = namespace_id, entries = namespace.len(), "recorded diff");
        }
    }
}

impl HistoryReader for HistoryStore {
    fn namespaces(&self) -> StateNamespaces {
        self.read().clone()
    }

    fn namespace(&self, namespace_id: &str) -> Option<StateNamespace> {
        self.read().get(namespace_id).cloned()
    }

    fn namespace_ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }
}
