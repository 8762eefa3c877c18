//! Walking the direct children of a node.
//!
//! The unsorted walks visit children in hash-map order, which changes from
//! run to run. The sorted walks collect the children first and order them by
//! plain string comparison, so `"10"` comes before `"2"`.

use crate::tree::{Bconf, ValueRef};

impl Bconf {
    /// All direct children, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ValueRef<'_>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.view()))
    }

    /// Direct children that are nodes, in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Bconf)> {
        self.iter().filter_map(|(k, v)| Some((k, v.as_node()?)))
    }

    /// Direct children that are leaves, in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter_map(|(k, v)| Some((k, v.as_leaf()?)))
    }

    /// All direct children, ordered by key.
    pub fn sorted(&self) -> Vec<(&str, ValueRef<'_>)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Direct child nodes, ordered by key.
    pub fn sorted_nodes(&self) -> impl Iterator<Item = (&str, &Bconf)> {
        self.sorted()
            .into_iter()
            .filter_map(|(k, v)| Some((k, v.as_node()?)))
    }

    /// Direct child leaves, ordered by key.
    pub fn sorted_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sorted()
            .into_iter()
            .filter_map(|(k, v)| Some((k, v.as_leaf()?)))
    }

    /// Call `f` for every direct child node. Leaves are skipped.
    ///
    /// When the order matters use [`Bconf::foreach_sorted_node`]; this one
    /// avoids the sort.
    pub fn foreach_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Bconf),
    {
        for (k, node) in self.nodes() {
            f(k, node);
        }
    }

    /// Call `f` for every direct leaf. Nodes are skipped.
    pub fn foreach_val<F>(&self, mut f: F)
    where
        F: FnMut(&str, &str),
    {
        for (k, v) in self.values() {
            f(k, v);
        }
    }

    /// Call `f` for every direct child node, in key order.
    pub fn foreach_sorted_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Bconf),
    {
        for (k, node) in self.sorted_nodes() {
            f(k, node);
        }
    }

    /// Call `f` for every direct leaf, in key order.
    pub fn foreach_sorted_val<F>(&self, mut f: F)
    where
        F: FnMut(&str, &str),
    {
        for (k, v) in self.sorted_values() {
            f(k, v);
        }
    }

    /// Same as [`Bconf::foreach_sorted_val`].
    pub fn foreach_sorted<F>(&self, f: F)
    where
        F: FnMut(&str, &str),
    {
        self.foreach_sorted_val(f);
    }
}
