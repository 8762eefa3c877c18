//! JSON loading and serialization.
//!
//! Loading goes through `serde_json::Value` and then normalizes the generic
//! tree into [`Bconf`] nodes and leaves:
//!
//! | JSON            | bconf                                   |
//! |-----------------|-----------------------------------------|
//! | object          | node                                    |
//! | array           | node keyed by index (`"0"`, `"1"`, ...) |
//! | string          | leaf                                    |
//! | number, boolean | leaf holding the JSON text              |
//! | null            | empty leaf                              |
//!
//! Serialization writes nodes as objects with keys in sorted order, so the
//! same tree always produces the same JSON text.

use std::io::Read;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value as Json};

use crate::error::{BconfError, Result};
use crate::tree::{Bconf, Value, ValueRef};

impl Bconf {
    /// Populate this tree from a JSON document.
    ///
    /// Top-level keys of the document replace same-named entries already in
    /// the tree; everything else is left alone. The root must be an object;
    /// a `null` root is an empty document.
    pub fn load_json(&mut self, js: &[u8]) -> Result<()> {
        let doc: Json = serde_json::from_slice(js)?;
        self.absorb_json(doc)
    }

    pub fn load_json_str(&mut self, js: &str) -> Result<()> {
        self.load_json(js.as_bytes())
    }

    /// Populate this tree from a reader producing a JSON document.
    pub fn load_json_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        let doc: Json = serde_json::from_reader(reader)?;
        self.absorb_json(doc)
    }

    fn absorb_json(&mut self, doc: Json) -> Result<()> {
        let loaded = Bconf::try_from(doc)?;
        self.entries.extend(loaded.entries);
        Ok(())
    }

    /// The tree as a generic JSON value, object keys in sorted order.
    pub fn to_json_value(&self) -> Json {
        let map: Map<String, Json> = self
            .sorted()
            .into_iter()
            .map(|(key, value)| {
                let json = match value {
                    ValueRef::Node(node) => node.to_json_value(),
                    ValueRef::Leaf(leaf) => Json::String(leaf.to_string()),
                };
                (key.to_string(), json)
            })
            .collect();
        Json::Object(map)
    }
}

impl TryFrom<Json> for Bconf {
    type Error = BconfError;

    fn try_from(doc: Json) -> Result<Self> {
        match doc {
            Json::Object(map) => Ok(from_object(map)),
            Json::Null => Ok(Bconf::new()),
            other => Err(BconfError::JsonRoot(kind(&other).to_string())),
        }
    }
}

fn from_object(map: Map<String, Json>) -> Bconf {
    map.into_iter()
        .map(|(key, value)| (key, normalize(value)))
        .collect()
}

fn normalize(value: Json) -> Value {
    match value {
        Json::Object(map) => Value::Node(from_object(map)),
        Json::Array(items) => Value::Node(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), normalize(item)))
                .collect(),
        ),
        Json::String(s) => Value::Leaf(s),
        Json::Number(n) => Value::Leaf(n.to_string()),
        Json::Bool(b) => Value::Leaf(b.to_string()),
        Json::Null => Value::Leaf(String::new()),
    }
}

fn kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

impl Serialize for Bconf {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.sorted();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            match value {
                ValueRef::Node(node) => map.serialize_entry(key, node)?,
                ValueRef::Leaf(leaf) => map.serialize_entry(key, leaf)?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Bconf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let doc = Json::deserialize(deserializer)?;
        Bconf::try_from(doc).map_err(de::Error::custom)
    }
}
