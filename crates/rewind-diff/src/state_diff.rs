//! State-level diff: structurally compare two values.
//!
//! Mappings are compared key by key and produce an [`ObjectDiff`]. Every
//! other pairing is atomic: it produces a [`PrimitiveDiff`] holding both
//! values verbatim when they are not strictly equal, and no diff otherwise.
//! Lists and functions are compared by identity, never by contents.

use std::collections::btree_map;
use std::collections::BTreeMap;

use rewind_types::{Key, Map, Value};

use crate::patch::Direction;

/// The result of comparing two values that are not equal.
///
/// "No diff" is `None` wherever a `Diff` is optional.
#[derive(Clone, Debug, PartialEq)]
pub enum Diff {
    /// A leaf changed.
    Primitive(PrimitiveDiff),
    /// One or more keys of a mapping changed.
    Object(ObjectDiff),
}

impl Diff {
    pub fn as_primitive(&self) -> Option<&PrimitiveDiff> {
        match self {
            Diff::Primitive(leaf) => Some(leaf),
            Diff::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectDiff> {
        match self {
            Diff::Object(object) => Some(object),
            Diff::Primitive(_) => None,
        }
    }

    /// Swap `before` and `after` on every leaf.
    ///
    /// Applying the inverse forward is the same as applying `self` backward.
    pub fn invert(&self) -> Diff {
        match self {
            Diff::Primitive(leaf) => Diff::Primitive(leaf.invert()),
            Diff::Object(object) => Diff::Object(ObjectDiff {
                entries: object
                    .entries
                    .iter()
                    .map(|(key, sub)| (key.clone(), sub.invert()))
                    .collect(),
            }),
        }
    }

    /// Every changed leaf, with the key path leading to it.
    ///
    /// A top-level primitive diff has an empty path.
    pub fn changes(&self) -> Vec<LeafChange<'_>> {
        let mut out = Vec::new();
        collect_changes(self, &mut Vec::new(), &mut out);
        out
    }

    /// Number of changed leaves.
    pub fn len(&self) -> usize {
        match self {
            Diff::Primitive(_) => 1,
            Diff::Object(object) => object.entries.values().map(Diff::len).sum(),
        }
    }

    /// Always `false`: a diff holds at least one change.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of leaves where a value appeared.
    pub fn additions(&self) -> usize {
        self.count_kind(ChangeKind::Added)
    }

    /// Number of leaves where a value disappeared.
    pub fn removals(&self) -> usize {
        self.count_kind(ChangeKind::Removed)
    }

    /// Number of leaves where one value replaced another.
    pub fn modifications(&self) -> usize {
        self.count_kind(ChangeKind::Modified)
    }

    fn count_kind(&self, kind: ChangeKind) -> usize {
        self.changes().iter().filter(|c| c.kind() == kind).count()
    }
}

fn collect_changes<'a>(diff: &'a Diff, path: &mut Vec<Key>, out: &mut Vec<LeafChange<'a>>) {
    match diff {
        Diff::Primitive(leaf) => out.push(LeafChange {
            path: path.clone(),
            leaf,
        }),
        Diff::Object(object) => {
            for (key, sub) in object.iter() {
                path.push(key.clone());
                collect_changes(sub, path, out);
                path.pop();
            }
        }
    }
}

/// A leaf-level change: the value before and the value after.
///
/// Either side may be `Undefined`, meaning the value was absent. Leaves built
/// by [`diff`] always have sides that are not strictly equal. The fields are
/// public and [`PrimitiveDiff::new`] does not check them, so hand-built and
/// decoded leaves may break that rule; [`PrimitiveDiff::changed`] is the
/// checked constructor.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveDiff {
    pub before: Value,
    pub after: Value,
}

impl PrimitiveDiff {
    /// Build a leaf without comparing the sides.
    pub fn new(before: Value, after: Value) -> Self {
        Self { before, after }
    }

    /// Build a leaf, or `None` if `before` and `after` are strictly equal.
    pub fn changed(before: Value, after: Value) -> Option<Self> {
        if before.strict_eq(&after) {
            None
        } else {
            Some(Self { before, after })
        }
    }

    /// Returns `true` if the sides are strictly equal, which only a
    /// hand-built or decoded leaf can be.
    pub fn is_noop(&self) -> bool {
        self.before.strict_eq(&self.after)
    }

    /// The side selected by `direction`: `after` going forward, `before`
    /// going backward.
    pub fn side(&self, direction: Direction) -> &Value {
        match direction {
            Direction::Forward => &self.after,
            Direction::Backward => &self.before,
        }
    }

    pub fn invert(&self) -> PrimitiveDiff {
        PrimitiveDiff::new(self.after.clone(), self.before.clone())
    }

    pub fn kind(&self) -> ChangeKind {
        if self.before.is_undefined() {
            ChangeKind::Added
        } else if self.after.is_undefined() {
            ChangeKind::Removed
        } else {
            ChangeKind::Modified
        }
    }
}

/// Per-key changes of a mapping. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectDiff {
    entries: BTreeMap<Key, Diff>,
}

impl ObjectDiff {
    /// Build an object diff, or `None` if `entries` is empty.
    pub fn from_entries(entries: BTreeMap<Key, Diff>) -> Option<Self> {
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn get(&self, key: &str) -> Option<&Diff> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; see [`ObjectDiff::from_entries`].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Key, Diff> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Key, Diff> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ObjectDiff {
    type Item = (&'a Key, &'a Diff);
    type IntoIter = btree_map::Iter<'a, Key, Diff>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// How a leaf changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// The value was absent before.
    Added,
    /// The value is absent after.
    Removed,
    /// One value replaced another.
    Modified,
}

/// A changed leaf located by its key path.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafChange<'a> {
    pub path: Vec<Key>,
    pub leaf: &'a PrimitiveDiff,
}

impl LeafChange<'_> {
    pub fn kind(&self) -> ChangeKind {
        self.leaf.kind()
    }

    /// Dotted path, e.g. `person.name`.
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(Key::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Compute the diff between two values.
///
/// Returns `None` when the values are equal under the comparison rules:
/// structural for mappings, strict for everything else.
pub fn diff(before: &Value, after: &Value) -> Option<Diff> {
    match (before, after) {
        (Value::Map(b), Value::Map(a)) => diff_maps(b, a).map(Diff::Object),
        _ if before.strict_eq(after) => None,
        _ => Some(Diff::Primitive(PrimitiveDiff::new(
            before.clone(),
            after.clone(),
        ))),
    }
}

fn diff_maps(before: &Map, after: &Map) -> Option<ObjectDiff> {
    let mut entries = BTreeMap::new();

    // Keys of `before`, then keys only `after` has.
    let keys = before
        .keys()
        .chain(after.keys().filter(|key| !before.contains_key(key.as_str())));

    for key in keys {
        if let Some(sub) = diff(before.get(key.as_str()), after.get(key.as_str())) {
            entries.insert(key.clone(), sub);
        }
    }

    ObjectDiff::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use rewind_types::{Function, List};
    use serde_json::json;

    use super::*;

    fn value(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn leaf(diff: &Diff) -> &PrimitiveDiff {
        diff.as_primitive().expect("expected a primitive diff")
    }

    #[test]
    fn identical_primitives_no_diff() {
        assert!(diff(&value(json!(1)), &value(json!(1))).is_none());
        assert!(diff(&value(json!("a")), &value(json!("a"))).is_none());
        assert!(diff(&Value::Null, &Value::Null).is_none());
        assert!(diff(&Value::Undefined, &Value::Undefined).is_none());
    }

    #[test]
    fn changed_primitive_is_leaf() {
        let d = diff(&value(json!(1)), &value(json!(2))).unwrap();
        assert_eq!(leaf(&d), &PrimitiveDiff::new(Value::from(1), Value::from(2)));
    }

    #[test]
    fn nested_change_produces_object_diff() {
        let a = value(json!({"person": {"age": 45, "name": "Jack"}}));
        let b = value(json!({"person": {"age": 45, "name": "Jim"}}));

        let d = diff(&a, &b).unwrap();
        let person = d.as_object().unwrap().get("person").unwrap();
        let person = person.as_object().unwrap();
        assert_eq!(person.len(), 1);
        assert!(person.get("age").is_none());
        assert_eq!(
            leaf(person.get("name").unwrap()),
            &PrimitiveDiff::new(Value::from("Jack"), Value::from("Jim"))
        );
    }

    #[test]
    fn equal_maps_in_different_order_no_diff() {
        let a: Value = Map::from_iter([("x", Value::from(1)), ("y", Value::from(2))]).into();
        let b: Value = Map::from_iter([("y", Value::from(2)), ("x", Value::from(1))]).into();
        assert!(diff(&a, &b).is_none());
    }

    #[test]
    fn null_is_never_diffed_as_a_map() {
        let map = value(json!({"a": 1}));
        let d = diff(&Value::Null, &map).unwrap();
        assert_eq!(leaf(&d), &PrimitiveDiff::new(Value::Null, map.clone()));
    }

    #[test]
    fn primitive_versus_map_is_verbatim_leaf() {
        let map = value(json!({"a": 1, "b": {"c": 2}}));

        let d = diff(&Value::from(5), &map).unwrap();
        assert_eq!(leaf(&d), &PrimitiveDiff::new(Value::from(5), map.clone()));

        let d = diff(&map, &Value::from("x")).unwrap();
        assert_eq!(leaf(&d), &PrimitiveDiff::new(map, Value::from("x")));
    }

    #[test]
    fn map_versus_list_is_leaf() {
        let d = diff(&value(json!({})), &value(json!([]))).unwrap();
        assert!(d.as_primitive().is_some());
    }

    #[test]
    fn distinct_equal_lists_differ() {
        let a = Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let b = Value::from(vec![Value::from(1), Value::from(2), Value::from(3)]);

        let d = diff(&a, &b).unwrap();
        let leaf = leaf(&d);
        assert!(leaf.before.strict_eq(&a));
        assert!(leaf.after.strict_eq(&b));
    }

    #[test]
    fn same_list_reference_no_diff() {
        let list = List::new(vec![Value::from(1)]);
        let a: Value = Map::from_iter([("items", Value::List(list.clone()))]).into();
        let b: Value = Map::from_iter([("items", Value::List(list))]).into();
        assert!(diff(&a, &b).is_none());
    }

    #[test]
    fn functions_compare_by_identity() {
        let f = Function::new("constant", |_| Value::from(1));
        let g = Function::new("constant", |_| Value::from(1));

        assert!(diff(&Value::from(f.clone()), &Value::from(f.clone())).is_none());
        assert!(diff(&Value::from(f), &Value::from(g)).is_some());
    }

    #[test]
    fn added_and_removed_keys() {
        let a = value(json!({"keep": true, "gone": 1}));
        let b = value(json!({"keep": true, "new": 2}));

        let d = diff(&a, &b).unwrap();
        let object = d.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(
            leaf(object.get("gone").unwrap()),
            &PrimitiveDiff::new(Value::from(1), Value::Undefined)
        );
        assert_eq!(
            leaf(object.get("new").unwrap()),
            &PrimitiveDiff::new(Value::Undefined, Value::from(2))
        );
        assert_eq!(d.additions(), 1);
        assert_eq!(d.removals(), 1);
        assert_eq!(d.modifications(), 0);
    }

    #[test]
    fn unchanged_nested_maps_are_omitted() {
        let a = value(json!({"a": {"b": {"c": 1}}, "d": 1}));
        let b = value(json!({"a": {"b": {"c": 1}}, "d": 2}));

        let d = diff(&a, &b).unwrap();
        let object = d.as_object().unwrap();
        assert!(object.get("a").is_none());
        assert_eq!(object.keys().count(), 1);
    }

    #[test]
    fn changes_report_paths() {
        let a = value(json!({"person": {"name": "Jack"}, "count": 1}));
        let b = value(json!({"person": {"name": "Jim"}, "count": 2}));

        let d = diff(&a, &b).unwrap();
        let mut paths: Vec<String> = d.changes().iter().map(LeafChange::dotted_path).collect();
        paths.sort();
        assert_eq!(paths, vec!["count", "person.name"]);
        assert_eq!(d.len(), 2);
        assert_eq!(d.modifications(), 2);
    }

    #[test]
    fn top_level_leaf_has_empty_path() {
        let d = diff(&Value::from(1), &Value::from(2)).unwrap();
        let changes = d.changes();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].path.is_empty());
    }

    #[test]
    fn invert_swaps_sides() {
        let a = value(json!({"x": 1}));
        let b = value(json!({"x": 2, "y": 3}));

        let forward = diff(&a, &b).unwrap();
        assert_eq!(forward.invert(), diff(&b, &a).unwrap());
        assert_eq!(forward.invert().invert(), forward);
    }

    #[test]
    fn checked_leaf_constructor() {
        assert!(PrimitiveDiff::changed(Value::from(1), Value::from(1)).is_none());
        let leaf = PrimitiveDiff::changed(Value::from(1), Value::from(2)).unwrap();
        assert!(!leaf.is_noop());

        let fresh = || Value::from(List::default());
        assert!(PrimitiveDiff::changed(fresh(), fresh()).is_some());

        assert!(PrimitiveDiff::new(Value::Null, Value::Null).is_noop());
    }

    #[test]
    fn empty_object_diff_is_rejected() {
        assert!(ObjectDiff::from_entries(BTreeMap::new()).is_none());
    }
}
