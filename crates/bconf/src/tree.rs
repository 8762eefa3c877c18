//! The configuration tree and path-based access.
//!
//! A [`Bconf`] maps string keys to [`Value`]s, and a value is either a nested
//! node or a string leaf. Numbers, booleans and everything else live in leaves
//! as text until [`crate::decode`] coerces them into a typed record.
//!
//! Paths are slices of key segments: `&["some", "node", "1"]` is the text
//! form `some.node.1`. Lookups never allocate; only [`Bconf::node_mut`] and
//! [`Bconf::add_value`] create the intermediate nodes a path needs.

use std::collections::HashMap;

use crate::error::{BconfError, Result};

/// A node in a bconf tree: a mapping from key to node-or-leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bconf {
    pub(crate) entries: HashMap<String, Value>,
}

/// An owned tree entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Node(Bconf),
    Leaf(String),
}

/// A borrowed tree entry, as returned by [`Bconf::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRef<'a> {
    Node(&'a Bconf),
    Leaf(&'a str),
}

impl Value {
    /// Borrow this entry as a [`ValueRef`].
    pub fn view(&self) -> ValueRef<'_> {
        match self {
            Value::Node(node) => ValueRef::Node(node),
            Value::Leaf(leaf) => ValueRef::Leaf(leaf),
        }
    }

    pub fn as_node(&self) -> Option<&Bconf> {
        self.view().as_node()
    }

    pub fn as_leaf(&self) -> Option<&str> {
        self.view().as_leaf()
    }
}

impl<'a> ValueRef<'a> {
    pub fn as_node(self) -> Option<&'a Bconf> {
        match self {
            ValueRef::Node(node) => Some(node),
            ValueRef::Leaf(_) => None,
        }
    }

    pub fn as_leaf(self) -> Option<&'a str> {
        match self {
            ValueRef::Leaf(leaf) => Some(leaf),
            ValueRef::Node(_) => None,
        }
    }
}

impl From<Bconf> for Value {
    fn from(node: Bconf) -> Self {
        Value::Node(node)
    }
}

impl From<String> for Value {
    fn from(leaf: String) -> Self {
        Value::Leaf(leaf)
    }
}

impl From<&str> for Value {
    fn from(leaf: &str) -> Self {
        Value::Leaf(leaf.to_string())
    }
}

impl Bconf {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of direct children (nodes and leaves).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Set a direct child, returning whatever was there before.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up the entry at `path` without creating anything.
    ///
    /// An empty path yields this node itself. Returns `None` when a segment is
    /// missing or when the path tries to continue past a leaf.
    pub fn get(&self, path: &[&str]) -> Option<ValueRef<'_>> {
        let Some((first, rest)) = path.split_first() else {
            return Some(ValueRef::Node(self));
        };
        let value = self.entries.get(*first)?;
        if rest.is_empty() {
            return Some(value.view());
        }
        match value {
            Value::Node(child) => child.get(rest),
            Value::Leaf(_) => None,
        }
    }

    /// Walk `path`, creating an empty node for every missing segment, and
    /// return the node at its end.
    ///
    /// Fails with [`BconfError::NotANode`] if any segment already holds a
    /// leaf. Nothing is created in that case: every segment before the leaf
    /// existed already.
    pub fn node_mut(&mut self, path: &[&str]) -> Result<&mut Bconf> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(self);
        };
        let value = self
            .entries
            .entry((*first).to_string())
            .or_insert_with(|| Value::Node(Bconf::new()));
        match value {
            Value::Node(child) => child.node_mut(rest),
            Value::Leaf(_) => Err(BconfError::NotANode {
                key: (*first).to_string(),
            }),
        }
    }

    /// Set the leaf at `path` to `value`.
    ///
    /// All but the last segment name the parent node, which is created on
    /// demand. Whatever was stored under the last segment, node or leaf, is
    /// replaced.
    pub fn add_value(&mut self, path: &[&str], value: impl Into<String>) -> Result<()> {
        let (last, parents) = path.split_last().ok_or(BconfError::EmptyPath)?;
        let node = self.node_mut(parents)?;
        node.entries
            .insert((*last).to_string(), Value::Leaf(value.into()));
        Ok(())
    }

    /// The node at `path`, or `None` if the path is absent or ends at a leaf.
    pub fn get_node(&self, path: &[&str]) -> Option<&Bconf> {
        self.get(path)?.as_node()
    }

    /// The leaf at `path`, or `None` if the path is absent, ends at a node,
    /// or is empty.
    pub fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get(path)?.as_leaf()
    }

    /// The leaf at `path`, or `""` when there is none.
    ///
    /// An absent key and a key holding an empty string look the same here;
    /// use [`Bconf::get_str`] when the difference matters.
    pub fn get_string(&self, path: &[&str]) -> &str {
        self.get_str(path).unwrap_or("")
    }
}

impl FromIterator<(String, Value)> for Bconf {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_mut_stops_at_leaf_without_creating() {
        let mut bc = Bconf::new();
        bc.add_value(&["a"], "leaf").unwrap();

        let err = bc.node_mut(&["a", "b", "c"]).unwrap_err();
        assert!(matches!(err, BconfError::NotANode { ref key } if key == "a"));
        assert_eq!(bc.get_string(&["a"]), "leaf");
        assert_eq!(bc.len(), 1);
    }

    #[test]
    fn node_mut_creates_whole_chain() {
        let mut bc = Bconf::new();
        bc.node_mut(&["x", "y", "z"]).unwrap();

        let z = bc.get_node(&["x", "y", "z"]).unwrap();
        assert!(z.is_empty());
    }
}
