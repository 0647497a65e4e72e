//! Patch application: replay a diff forward or backward against a base.
//!
//! Application never fails. When the base no longer has the shape the diff
//! expects (a mapping where the diff holds per-key changes), the base is
//! treated as an empty mapping and only the diffed keys are materialised.

use rewind_types::{Map, Value};
use tracing::debug;

use crate::state_diff::Diff;

/// Which side of each leaf to materialise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Take `after`: move from the older state to the newer one.
    #[default]
    Forward,
    /// Take `before`: move from the newer state to the older one.
    Backward,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Apply `diff` to `base`, selecting leaf sides by `direction`.
///
/// - A primitive diff yields its selected side; `base` is ignored.
/// - No diff yields a copy of `base`. Lists and functions inside it keep
///   their identity.
/// - An object diff copies `base` and replaces each diffed key with the
///   recursive application of that key's sub-diff. Keys the diff does not
///   mention are left as they are.
///
/// `base` is never modified.
pub fn apply_diff(base: &Value, diff: Option<&Diff>, direction: Direction) -> Value {
    match diff {
        None => base.clone(),
        Some(Diff::Primitive(leaf)) => leaf.side(direction).clone(),
        Some(Diff::Object(object)) => {
            let mut target = match base {
                Value::Map(map) => map.clone(),
                other => {
                    debug!(
                        base = other.type_name(),
                        keys = object.len(),
                        "object diff applied to non-map base; starting from empty map"
                    );
                    Map::new()
                }
            };

            for (key, sub) in object {
                let next = apply_diff(base.get(key.as_str()), Some(sub), direction);
                target.insert(key.clone(), next);
            }

            Value::Map(target)
        }
    }
}

/// Apply `diff` moving forward in time.
pub fn apply_forward(base: &Value, diff: Option<&Diff>) -> Value {
    apply_diff(base, diff, Direction::Forward)
}

/// Apply `diff` moving backward in time.
pub fn apply_backward(base: &Value, diff: Option<&Diff>) -> Value {
    apply_diff(base, diff, Direction::Backward)
}

impl Diff {
    /// Apply this diff to `base`. See [`apply_diff`].
    pub fn apply(&self, base: &Value, direction: Direction) -> Value {
        apply_diff(base, Some(self), direction)
    }
}
