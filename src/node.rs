//! The configuration tree.
//!
//! A [`Node`] is either a [`Scalar`] (a named [`Value`]) or a [`Section`] (a
//! named set of child nodes). Every tree hangs off a root section whose name is
//! the reserved [`ROOT_NAME`]; user code can never create a section with that
//! name.
//!
//! Ownership is strictly tree-shaped: a section owns its children and no node
//! has more than one parent.
//!
//! ## Examples
//!
//! ```rust
//! use datascript::{Node, Section, Value};
//!
//! let mut root = Section::root();
//! root.set("age", 30);
//! root.create_section("server").unwrap().set("port", 8080);
//!
//! assert!(root.is_root());
//! assert!(matches!(root.node("age"), Some(Node::Scalar(_))));
//! assert!(matches!(root.node("server"), Some(Node::Section(_))));
//! ```

use crate::{Error, NodeMap, Result, Value};

/// The name of the root section. Reserved: no other section may use it,
/// compared case-insensitively.
pub const ROOT_NAME: &str = "~root";

/// Returns `true` if `key` is the reserved root name, ignoring ASCII case.
///
/// # Examples
///
/// ```rust
/// use datascript::is_reserved;
///
/// assert!(is_reserved("~root"));
/// assert!(is_reserved("~ROOT"));
/// assert!(!is_reserved("root"));
/// ```
#[must_use]
pub fn is_reserved(key: &str) -> bool {
    key.eq_ignore_ascii_case(ROOT_NAME)
}

/// Returns `true` if `key` can be written and read back as a node name.
///
/// A name must be non-empty, have no surrounding whitespace and contain no
/// `=`, `{`, `}` or line break.
///
/// # Examples
///
/// ```rust
/// use datascript::is_valid_key;
///
/// assert!(is_valid_key("max players"));
/// assert!(!is_valid_key(""));
/// assert!(!is_valid_key(" padded"));
/// assert!(!is_valid_key("a=b"));
/// assert!(!is_valid_key("open{"));
/// assert!(!is_valid_key("two\nlines"));
/// ```
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.trim() == key
        && !key.contains(['=', '{', '}', '\n', '\r'])
}

/// Checks a scalar name.
pub(crate) fn check_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(Error::invalid_key(key))
    }
}

/// Checks a section name: a valid key that is not the root name.
pub(crate) fn check_section_key(key: &str) -> Result<()> {
    check_key(key)?;
    if is_reserved(key) {
        return Err(Error::invalid_key(key));
    }
    Ok(())
}

/// One entry in the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Section(Section),
}

impl Node {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::Scalar(scalar) => scalar.name(),
            Node::Section(section) => section.name(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self, Node::Section(_))
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            Node::Section(_) => None,
        }
    }

    #[must_use]
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Node::Section(section) => Some(section),
            Node::Scalar(_) => None,
        }
    }

    pub fn as_section_mut(&mut self) -> Option<&mut Section> {
        match self {
            Node::Section(section) => Some(section),
            Node::Scalar(_) => None,
        }
    }

    /// Returns the same node under a new name. Section children move along.
    pub(crate) fn renamed(self, name: String) -> Node {
        match self {
            Node::Scalar(scalar) => Node::Scalar(Scalar {
                name,
                value: scalar.value,
            }),
            Node::Section(section) => Node::Section(Section {
                name,
                nodes: section.nodes,
            }),
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Section> for Node {
    fn from(section: Section) -> Self {
        Node::Section(section)
    }
}

/// A leaf node holding one typed value (or one list of them).
#[derive(Clone, Debug, PartialEq)]
pub struct Scalar {
    name: String,
    value: Value,
}

impl Scalar {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Scalar {
            name: name.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }
}

/// An inner node holding uniquely named children.
///
/// The query and mutation API lives in [`crate::section`].
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    name: String,
    nodes: NodeMap,
}

impl Section {
    /// Creates an empty root section.
    #[must_use]
    pub fn root() -> Self {
        Section::new(ROOT_NAME)
    }

    pub(crate) fn new(name: impl Into<String>) -> Self {
        Section {
            name: name.into(),
            nodes: NodeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the root section of a tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.name == ROOT_NAME
    }

    /// The children of this section.
    #[must_use]
    pub fn children(&self) -> &NodeMap {
        &self.nodes
    }

    pub(crate) fn children_mut(&mut self) -> &mut NodeMap {
        &mut self.nodes
    }

    /// Adds a child, replacing any child with the same name.
    pub(crate) fn insert_node(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node)
    }
}
