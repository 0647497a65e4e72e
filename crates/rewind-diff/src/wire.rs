//! JSON wire form of a diff, as read by external inspection tools.
//!
//! A leaf is written as `{"_diff": {"before": b, "after": a}}` and an object
//! diff as a JSON object of key to sub-diff. Sides that JSON cannot carry
//! (`undefined`, functions, symbols) are omitted, so an added key reads
//! `{"_diff": {"after": v}}`.
//!
//! Decoding treats any object whose sole member is `_diff` as a leaf. The
//! encoding is lossy: a leaf whose sides were functions, symbols, or `NaN`
//! decodes with `Undefined` or `Null` sides, possibly equal to each other.

use std::collections::BTreeMap;

use rewind_types::{Key, Value};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DiffError, DiffResult};
use crate::state_diff::{Diff, ObjectDiff, PrimitiveDiff};

/// Member name marking a leaf in the wire form.
pub const LEAF_MARKER: &str = "_diff";

impl Serialize for PrimitiveDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(1))?;
        out.serialize_entry(LEAF_MARKER, &LeafBody(self))?;
        out.end()
    }
}

struct LeafBody<'a>(&'a PrimitiveDiff);

impl Serialize for LeafBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(None)?;
        if !self.0.before.is_json_omitted() {
            out.serialize_entry("before", &self.0.before)?;
        }
        if !self.0.after.is_json_omitted() {
            out.serialize_entry("after", &self.0.after)?;
        }
        out.end()
    }
}

impl Serialize for ObjectDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (key, sub) in self {
            out.serialize_entry(key, sub)?;
        }
        out.end()
    }
}

impl Serialize for Diff {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Diff::Primitive(leaf) => leaf.serialize(serializer),
            Diff::Object(object) => object.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Diff {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Diff::from_json(&json).map_err(D::Error::custom)
    }
}

impl Diff {
    /// Encode into the wire form.
    pub fn to_json(&self) -> DiffResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }

    /// Decode from the wire form.
    ///
    /// Functions and symbols are not recoverable: sides omitted on encode
    /// decode as `Undefined`.
    pub fn from_json(json: &serde_json::Value) -> DiffResult<Diff> {
        decode(json, &mut Vec::new())
    }

    /// Decode from wire-form JSON text.
    pub fn from_json_str(text: &str) -> DiffResult<Diff> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DiffError::InvalidJson(e.to_string()))?;
        Diff::from_json(&json)
    }
}

fn decode(json: &serde_json::Value, path: &mut Vec<String>) -> DiffResult<Diff> {
    let members = json
        .as_object()
        .ok_or_else(|| DiffError::NotADiff(json_type(json)))?;

    if members.len() == 1 {
        if let Some(body) = members.get(LEAF_MARKER) {
            return decode_leaf(body, path).map(Diff::Primitive);
        }
    }

    let mut entries = BTreeMap::new();
    for (name, sub) in members {
        path.push(name.clone());
        let decoded = decode(sub, path)?;
        path.pop();
        entries.insert(Key::from(name), decoded);
    }

    ObjectDiff::from_entries(entries)
        .map(Diff::Object)
        .ok_or_else(|| DiffError::EmptyObjectDiff(path.join(".")))
}

fn decode_leaf(body: &serde_json::Value, path: &[String]) -> DiffResult<PrimitiveDiff> {
    let body = body.as_object().ok_or_else(|| DiffError::MalformedLeaf {
        path: path.join("."),
        reason: format!("leaf body is {}, expected object", json_type(body)),
    })?;

    if let Some(unknown) = body.keys().find(|k| *k != "before" && *k != "after") {
        return Err(DiffError::MalformedLeaf {
            path: path.join("."),
            reason: format!("unexpected member `{unknown}`"),
        });
    }

    // Encoding is lossy (functions, symbols, NaN), so the decoded sides may
    // compare equal even though the recorded leaf was a change.
    let side = |name: &str| body.get(name).map(Value::from).unwrap_or_default();
    Ok(PrimitiveDiff::new(side("before"), side("after")))
}

fn json_type(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
