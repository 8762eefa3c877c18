//! Deep union of two trees.

use crate::tree::{Bconf, Value};

impl Bconf {
    /// Merge `src` into `self`, with `src` winning every conflict.
    ///
    /// For each key in `src`:
    /// - missing in `self`, or a leaf on either side: `self` takes a copy of
    ///   `src`'s entry, discarding whatever it had (a node is never merged
    ///   into a leaf or the other way around);
    /// - a node on both sides: the two nodes are merged recursively.
    ///
    /// `src` is left untouched.
    pub fn merge(&mut self, src: &Bconf) {
        for (key, theirs) in &src.entries {
            match (self.entries.get_mut(key), theirs) {
                (Some(Value::Node(ours)), Value::Node(theirs)) => ours.merge(theirs),
                _ => {
                    self.entries.insert(key.clone(), theirs.clone());
                }
            }
        }
    }

    /// Owned form of [`Bconf::merge`].
    pub fn merged(mut self, src: &Bconf) -> Bconf {
        self.merge(src);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_replaces_node() {
        let mut dst = Bconf::new();
        dst.add_value(&["a", "b"], "1").unwrap();
        let mut src = Bconf::new();
        src.add_value(&["a"], "2").unwrap();

        dst.merge(&src);
        assert_eq!(dst.get_string(&["a"]), "2");
        assert!(dst.get_node(&["a"]).is_none());
    }
}
