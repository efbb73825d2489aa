//! Ordered child map for sections.
//!
//! [`NodeMap`] wraps an [`IndexMap`] keyed by node name, which gives sections
//! two properties:
//!
//! - **Uniqueness**: inserting a node whose name is already present replaces
//!   the old node, so a section never holds two children with the same name
//! - **Deterministic output**: children are iterated, and therefore written,
//!   in insertion order; a replaced node keeps its original position
//!
//! Equality ignores order: two maps are equal when they hold the same named
//! nodes.

use crate::Node;
use indexmap::IndexMap;

/// An insertion-ordered set of nodes keyed by their names.
///
/// # Examples
///
/// ```rust
/// use datascript::{NodeMap, Node, Scalar, Value};
///
/// let mut map = NodeMap::new();
/// map.insert(Node::Scalar(Scalar::new("first", Value::Int(1))));
/// map.insert(Node::Scalar(Scalar::new("second", Value::Int(2))));
/// map.insert(Node::Scalar(Scalar::new("first", Value::Int(3))));
///
/// let keys: Vec<_> = map.keys().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeMap(IndexMap<String, Node>);

impl NodeMap {
    /// Creates an empty `NodeMap`.
    #[must_use]
    pub fn new() -> Self {
        NodeMap(IndexMap::new())
    }

    /// Inserts a node under its own name.
    ///
    /// If the map already contained a node with this name, it is replaced in
    /// place and returned.
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        self.0.insert(node.name().to_string(), node)
    }

    /// Removes the node with the given name, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    // Not public: a caller renaming the node in place would desync the key.
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns an iterator over the node names, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns an iterator over the nodes, in insertion order.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }
}

impl IntoIterator for NodeMap {
    type Item = Node;
    type IntoIter = indexmap::map::IntoValues<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl<'a> IntoIterator for &'a NodeMap {
    type Item = &'a Node;
    type IntoIter = indexmap::map::Values<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

impl FromIterator<Node> for NodeMap {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let mut map = NodeMap::new();
        for node in iter {
            map.insert(node);
        }
        map
    }
}
