//! Keyed queries and mutations on a [`Section`].
//!
//! Every operation addresses a direct child by name. Typed accessors never
//! fail: a missing key or a value of the wrong type yields `None` (or the
//! caller's fallback).
//!
//! ## Examples
//!
//! ```rust
//! use datascript::Section;
//!
//! let mut root = Section::root();
//! root.set("age", 30);
//! root.rename("age", "years").unwrap();
//!
//! assert_eq!(root.value_as::<i32>("years"), Some(30));
//! assert_eq!(root.value_or("age", 0), 0);
//!
//! root.set_opt::<i32>("years", None);
//! assert!(root.is_empty());
//! ```

use crate::node::{check_key, check_section_key};
use crate::{ser, Error, Node, Result, Scalar, Section, Value};
use serde::Serialize;

impl Section {
    /// Returns the child node with the given name.
    #[must_use]
    pub fn node(&self, key: &str) -> Option<&Node> {
        self.children().get(key)
    }

    /// Returns the value of a scalar child, or `None` if the key is missing or
    /// names a section.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.node(key).and_then(Node::as_scalar).map(Scalar::value)
    }

    /// Returns the value of a scalar child converted to `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Section;
    ///
    /// let mut root = Section::root();
    /// root.set("ratio", 3.5);
    ///
    /// assert_eq!(root.value_as::<f64>("ratio"), Some(3.5));
    /// assert_eq!(root.value_as::<String>("ratio"), None);
    /// ```
    #[must_use]
    pub fn value_as<T: TryFrom<Value>>(&self, key: &str) -> Option<T> {
        self.value(key).cloned().and_then(|v| T::try_from(v).ok())
    }

    /// Returns the value of a scalar child converted to `T`, or `fallback`
    /// when it is missing or of another type.
    #[must_use]
    pub fn value_or<T: TryFrom<Value>>(&self, key: &str, fallback: T) -> T {
        self.value_as(key).unwrap_or(fallback)
    }

    /// Returns the elements of a list child.
    #[must_use]
    pub fn list(&self, key: &str) -> Option<&[Value]> {
        self.value(key).and_then(Value::as_list)
    }

    /// Returns the elements of a list child converted to `T`. `None` if any
    /// element does not convert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Section;
    ///
    /// let mut root = Section::root();
    /// root.set("tags", vec!["a", "b"]);
    ///
    /// assert_eq!(root.list_as::<String>("tags"), Some(vec!["a".to_string(), "b".to_string()]));
    /// assert_eq!(root.list_as::<i64>("tags"), None);
    /// ```
    #[must_use]
    pub fn list_as<T: TryFrom<Value>>(&self, key: &str) -> Option<Vec<T>> {
        self.list(key)?
            .iter()
            .cloned()
            .map(|v| T::try_from(v).ok())
            .collect()
    }

    /// Like [`Section::list_as`], with a fallback.
    #[must_use]
    pub fn list_or<T: TryFrom<Value>>(&self, key: &str, fallback: Vec<T>) -> Vec<T> {
        self.list_as(key).unwrap_or(fallback)
    }

    /// Sets a scalar child.
    ///
    /// An existing scalar is overwritten in place; an existing section with the
    /// same name is replaced by the scalar. The name is not checked here: one
    /// that fails [`crate::is_valid_key`] makes writing the tree fail.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();

        if let Some(Node::Scalar(scalar)) = self.children_mut().get_mut(&key) {
            scalar.set_value(value);
            return;
        }
        self.insert_node(Node::Scalar(Scalar::new(key, value)));
    }

    /// Sets a scalar child, or removes it when `value` is `None`.
    pub fn set_opt<V: Into<Value>>(&mut self, key: impl Into<String>, value: Option<V>) {
        let key = key.into();
        match value {
            Some(value) => self.set(key, value),
            None => {
                self.unset(&key);
            }
        }
    }

    /// Removes a child, returning it. Missing keys are a no-op.
    pub fn unset(&mut self, key: &str) -> Option<Node> {
        self.children_mut().remove(key)
    }

    /// Moves a child to a new name. A child already using `new_key` is replaced.
    /// Missing keys are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `new_key` fails
    /// [`crate::is_valid_key`], or when renaming a section to the reserved
    /// root name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Section;
    ///
    /// let mut root = Section::root();
    /// root.create_section("old").unwrap().set("x", 1);
    /// root.rename("old", "new").unwrap();
    ///
    /// assert!(root.section("old").is_none());
    /// assert_eq!(root.section("new").and_then(|s| s.value_as::<i32>("x")), Some(1));
    /// assert!(root.rename("new", "~root").is_err());
    /// ```
    pub fn rename(&mut self, key: &str, new_key: impl Into<String>) -> Result<()> {
        let new_key = new_key.into();

        let Some(node) = self.node(key) else {
            return Ok(());
        };
        if node.is_section() {
            check_section_key(&new_key)?;
        } else {
            check_key(&new_key)?;
        }
        if key == new_key {
            return Ok(());
        }

        if let Some(node) = self.unset(key) {
            self.insert_node(node.renamed(new_key));
        }
        Ok(())
    }

    /// Returns a child section.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.node(key).and_then(Node::as_section)
    }

    /// Returns a child section, mutably.
    pub fn section_mut(&mut self, key: &str) -> Option<&mut Section> {
        self.children_mut()
            .get_mut(key)
            .and_then(Node::as_section_mut)
    }

    /// Returns the child section named `key`, creating it if needed.
    ///
    /// Idempotent for existing sections. A scalar with the same name is
    /// replaced by the new, empty section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` fails [`crate::is_valid_key`] or
    /// is the reserved root name.
    pub fn create_section(&mut self, key: &str) -> Result<&mut Section> {
        check_section_key(key)?;

        if !self.node(key).is_some_and(Node::is_section) {
            self.insert_node(Node::Section(Section::new(key)));
        }

        self.section_mut(key)
            .ok_or_else(|| Error::custom(format!("section {:?} vanished after insert", key)))
    }

    /// Alias of [`Section::create_section`].
    pub fn section_or_new(&mut self, key: &str) -> Result<&mut Section> {
        self.create_section(key)
    }

    /// Gets or creates the child section `key` and hands it to `f`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Section;
    ///
    /// let mut root = Section::root();
    /// root.with_section("server", |server| {
    ///     server.set("host", "localhost");
    ///     server.set("port", 8080);
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(root.section("server").map(|s| s.len()), Some(2));
    /// ```
    pub fn with_section<F, R>(&mut self, key: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut Section) -> R,
    {
        Ok(f(self.create_section(key)?))
    }

    /// Returns the names of all children, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children().keys()
    }

    /// Returns all children, in order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.children().iter()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.children().contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// Removes every child, and with them all descendants.
    pub fn clear(&mut self) {
        self.children_mut().clear();
    }

    /// Writes the fields of `object` into the child section `section_key`,
    /// creating it if needed.
    ///
    /// Each field becomes a scalar named by [`crate::normalize_naming`];
    /// fields holding structs or maps become nested sections, `None` fields
    /// unset their key and `#[serde(skip)]` fields are ignored. Other children
    /// of the target section are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] if `object` is not a struct or map,
    /// or one of its fields has no literal form (nested sequences, for
    /// example), and [`Error::InvalidKey`] if `section_key` or a field or
    /// map key is not a usable name. On error the section is left untouched
    /// and no new section is created.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Section;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Server {
    ///     host: String,
    ///     #[serde(rename = "maxPlayers")]
    ///     max_players: i32,
    ///     #[serde(skip)]
    ///     secret: String,
    /// }
    ///
    /// let mut root = Section::root();
    /// let server = Server { host: "localhost".into(), max_players: 20, secret: "x".into() };
    /// root.store("server", &server).unwrap();
    ///
    /// let section = root.section("server").unwrap();
    /// assert_eq!(section.value_as::<i32>("max players"), Some(20));
    /// assert!(!section.contains_key("secret"));
    /// ```
    pub fn store<T: ?Sized + Serialize>(&mut self, section_key: &str, object: &T) -> Result<()> {
        check_section_key(section_key)?;
        let fields = ser::capture_fields(object)?;
        ser::apply(self.create_section(section_key)?, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut root = Section::root();
        root.set("a", 1);
        root.set("b", 2);
        root.set("a", "now a string");

        assert_eq!(root.len(), 2);
        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(root.value("a"), Some(&Value::from("now a string")));
    }

    #[test]
    fn test_set_replaces_section() {
        let mut root = Section::root();
        root.create_section("x").unwrap().set("inner", 1);
        root.set("x", 5i64);

        assert!(root.section("x").is_none());
        assert_eq!(root.value("x"), Some(&Value::Long(5)));
    }

    #[test]
    fn test_unset_missing_is_noop() {
        let mut root = Section::root();
        root.set("a", 1);
        let before = root.clone();

        assert!(root.unset("missing").is_none());
        assert_eq!(root, before);
    }

    #[test]
    fn test_set_opt_none_unsets() {
        let mut root = Section::root();
        root.set("a", 1);
        root.set_opt::<i32>("a", None);
        assert!(!root.contains_key("a"));

        root.set_opt("b", Some(true));
        assert_eq!(root.value_as::<bool>("b"), Some(true));
    }

    #[test]
    fn test_value_mismatch_falls_back() {
        let mut root = Section::root();
        root.set("name", "Alice");

        assert_eq!(root.value_as::<i32>("name"), None);
        assert_eq!(root.value_or("name", 7), 7);
        assert_eq!(root.value_or("name", String::new()), "Alice");
        assert_eq!(root.list_or::<i32>("name", vec![1]), vec![1]);
    }

    #[test]
    fn test_value_of_section_is_absent() {
        let mut root = Section::root();
        root.create_section("s").unwrap();
        assert!(root.value("s").is_none());
        assert!(root.node("s").is_some());
    }

    #[test]
    fn test_create_section_idempotent() {
        let mut root = Section::root();
        root.create_section("s").unwrap().set("x", 1);
        let again = root.create_section("s").unwrap();
        assert_eq!(again.value_as::<i32>("x"), Some(1));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_create_section_replaces_scalar() {
        let mut root = Section::root();
        root.set("s", 1);
        root.create_section("s").unwrap();
        assert!(root.section("s").is_some_and(Section::is_empty));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_reserved_names() {
        let mut root = Section::root();
        assert!(matches!(root.create_section("~root"), Err(Error::InvalidKey(_))));
        assert!(matches!(root.create_section("~ROOT"), Err(Error::InvalidKey(_))));
        assert!(root.with_section("~Root", |_| ()).is_err());
        assert!(root.is_empty());
    }

    #[test]
    fn test_rename_scalar() {
        let mut root = Section::root();
        root.set("age", 30);
        root.rename("age", "years").unwrap();

        assert!(!root.contains_key("age"));
        assert_eq!(root.value("years"), Some(&Value::Int(30)));
    }

    #[test]
    fn test_rename_over_existing() {
        let mut root = Section::root();
        root.set("a", 1);
        root.set("b", 2);
        root.rename("a", "b").unwrap();

        assert_eq!(root.len(), 1);
        assert_eq!(root.value_as::<i32>("b"), Some(1));
    }

    #[test]
    fn test_rename_missing_and_same() {
        let mut root = Section::root();
        root.set("a", 1);
        root.rename("missing", "x").unwrap();
        root.rename("a", "a").unwrap();
        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_rename_scalar_to_reserved_allowed() {
        let mut root = Section::root();
        root.set("a", 1);
        root.rename("a", "~root").unwrap();
        assert!(root.contains_key("~root"));
    }

    #[test]
    fn test_unusable_names_rejected() {
        let mut root = Section::root();
        for key in ["", "a=b", "{}", "a\nb", " padded", "padded "] {
            assert!(
                matches!(root.create_section(key), Err(Error::InvalidKey(_))),
                "{:?} should be rejected",
                key
            );
        }

        root.set("a", 1);
        root.create_section("s").unwrap();
        assert!(matches!(root.rename("a", "a\nb"), Err(Error::InvalidKey(_))));
        assert!(matches!(root.rename("s", "x = y"), Err(Error::InvalidKey(_))));
        assert!(matches!(root.rename("s", "~root"), Err(Error::InvalidKey(_))));
        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["a", "s"]);
    }

    #[test]
    fn test_failed_store_creates_nothing() {
        #[derive(serde::Serialize)]
        struct Grid {
            name: &'static str,
            cells: Vec<Vec<i32>>,
        }

        let mut root = Section::root();
        let grid = Grid {
            name: "g",
            cells: vec![vec![1]],
        };
        assert!(matches!(root.store("grid", &grid), Err(Error::UnsupportedType(_))));
        assert!(!root.contains_key("grid"));

        root.create_section("kept").unwrap().set("x", 1);
        assert!(root.store("kept", &grid).is_err());
        assert_eq!(
            root.section("kept").map(|s| s.keys().collect::<Vec<_>>()),
            Some(vec!["x"])
        );

        assert!(matches!(root.store("bad=key", &5), Err(Error::InvalidKey(_))));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_clear_recursive() {
        let mut root = Section::root();
        root.create_section("a")
            .unwrap()
            .create_section("b")
            .unwrap()
            .set("c", 1);
        root.set("d", 2);

        root.clear();
        assert!(root.is_empty());
        assert!(root.is_root());
    }
}
