//! Serde bridge.
//!
//! Any `T: Serialize` can be captured into the tree. This is how
//! [`Section::store`] enumerates the fields of a value: serde's derive is the
//! field descriptor, and `#[serde(skip)]` marks fields to ignore.
//!
//! | Rust | Stored as |
//! |------|-----------|
//! | `bool` | `Bool` |
//! | `i8` / `i16` / `i32` / `i64` | `Byte` / `Short` / `Int` / `Long` |
//! | `u8` / `u16` / `u32` | `Short` / `Int` / `Long` (widened) |
//! | `u64` | `Long`, if it fits |
//! | `f32` / `f64` | `Double` |
//! | `char` | `Char` |
//! | `&str` / `String` / unit enum variants | `String` |
//! | `uuid::Uuid` | `Uuid` |
//! | sequences, tuples, bytes | `List` |
//! | structs, maps | nested section |
//! | `None`, `()` | absent: the key is unset |
//!
//! Struct field names pass through [`normalize_naming`]; map keys are used as
//! they are. Either way the resulting key must pass [`crate::is_valid_key`],
//! and a key holding a nested section may not be the root name.
//!
//! A string that parses as a UUID is serialized a second time in compact
//! (not human-readable) form. Types such as `uuid::Uuid` emit 16 raw bytes
//! there and are stored as `Uuid`; plain strings stay strings.
//!
//! ## Examples
//!
//! ```rust
//! use datascript::{to_value, Value};
//!
//! assert_eq!(to_value(&42u8).unwrap(), Value::Short(42));
//! assert_eq!(to_value(&uuid::Uuid::nil()).unwrap(), Value::Uuid(uuid::Uuid::nil()));
//! assert_eq!(
//!     to_value(&vec!["a", "b"]).unwrap(),
//!     Value::List(vec![Value::from("a"), Value::from("b")])
//! );
//! ```

use crate::node::{check_key, check_section_key};
use crate::{Error, Result, Section, Value};
use serde::{ser, Serialize};
use uuid::Uuid;

/// The result of serializing one value.
pub(crate) enum Captured {
    Absent,
    Value(Value),
    Fields(Vec<(String, Captured)>),
}

/// Converts any `T: Serialize` to a [`Value`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for structs and maps (they become
/// sections, see [`Section::store`]), absent values, nested sequences and
/// enum variants carrying data.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    match capture(value)? {
        Captured::Value(value) => Ok(value),
        Captured::Absent => Err(Error::unsupported_type("absent value")),
        Captured::Fields(_) => Err(Error::unsupported_type(
            "structs and maps are stored as sections",
        )),
    }
}

/// Captures the fields of a struct or map without touching any tree.
pub(crate) fn capture_fields<T>(object: &T) -> Result<Vec<(String, Captured)>>
where
    T: ?Sized + Serialize,
{
    match capture(object)? {
        Captured::Fields(fields) => Ok(fields),
        _ => Err(Error::unsupported_type("store expects a struct or map")),
    }
}

/// Writes captured fields into `section`. Keys were checked during capture.
pub(crate) fn apply(section: &mut Section, fields: Vec<(String, Captured)>) -> Result<()> {
    for (key, captured) in fields {
        match captured {
            Captured::Absent => {
                section.unset(&key);
            }
            Captured::Value(value) => section.set(key, value),
            Captured::Fields(nested) => apply(section.create_section(&key)?, nested)?,
        }
    }
    Ok(())
}

fn capture<T: Serialize + ?Sized>(value: &T) -> Result<Captured> {
    let captured = value.serialize(NodeSerializer::readable())?;
    let uuid_text = matches!(
        &captured,
        Captured::Value(Value::String(text)) if Uuid::parse_str(text).is_ok()
    );
    if !uuid_text {
        return Ok(captured);
    }

    match value.serialize(NodeSerializer::compact()) {
        Ok(uuid @ Captured::Value(Value::Uuid(_))) => Ok(uuid),
        _ => Ok(captured),
    }
}

/// Turns a field name into a section key.
///
/// A space is inserted at every lowercase-to-uppercase boundary, the result
/// is lowercased, every run of characters other than `a-z` and `0-9` becomes
/// a single space, and the ends are trimmed. Blank input is returned as is.
///
/// # Examples
///
/// ```rust
/// use datascript::normalize_naming;
///
/// assert_eq!(normalize_naming("maxPlayers"), "max players");
/// assert_eq!(normalize_naming("max_players"), "max players");
/// assert_eq!(normalize_naming("HTTPServer"), "httpserver");
/// assert_eq!(normalize_naming("__userID2__"), "user id2");
/// ```
#[must_use]
pub fn normalize_naming(input: &str) -> String {
    if input.trim().is_empty() {
        return input.to_string();
    }

    let mut spaced = String::with_capacity(input.len() + 4);
    let mut previous: Option<char> = None;
    for ch in input.chars() {
        if previous.is_some_and(char::is_lowercase) && ch.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
        previous = Some(ch);
    }

    let mut normalized = String::with_capacity(spaced.len());
    let mut gap = false;
    for ch in spaced.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if gap && !normalized.is_empty() {
                normalized.push(' ');
            }
            gap = false;
            normalized.push(ch);
        } else {
            gap = true;
        }
    }
    normalized
}

fn map_key(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Char(c) => Ok(c.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Uuid(u) => Ok(u.to_string()),
        other => match other.as_i64() {
            Some(i) => Ok(i.to_string()),
            None => Err(Error::unsupported_type(&format!(
                "{} map keys",
                other.kind()
            ))),
        },
    }
}

#[derive(Clone, Copy)]
struct NodeSerializer {
    human_readable: bool,
}

impl NodeSerializer {
    const fn readable() -> Self {
        NodeSerializer {
            human_readable: true,
        }
    }

    const fn compact() -> Self {
        NodeSerializer {
            human_readable: false,
        }
    }
}

struct SerializeList {
    elements: Vec<Value>,
}

struct SerializeFields {
    fields: Vec<(String, Captured)>,
    current_key: Option<String>,
}

impl ser::Serializer for NodeSerializer {
    type Ok = Captured;
    type Error = Error;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeList;
    type SerializeMap = SerializeFields;
    type SerializeStruct = SerializeFields;
    type SerializeStructVariant = SerializeFields;

    fn is_human_readable(&self) -> bool {
        self.human_readable
    }

    fn serialize_bool(self, v: bool) -> Result<Captured> {
        Ok(Captured::Value(Value::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Captured> {
        Ok(Captured::Value(Value::Byte(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Captured> {
        Ok(Captured::Value(Value::Short(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Captured> {
        Ok(Captured::Value(Value::Int(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Captured> {
        Ok(Captured::Value(Value::Long(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Captured> {
        Ok(Captured::Value(Value::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Captured> {
        Ok(Captured::Value(Value::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Captured> {
        Ok(Captured::Value(Value::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Captured> {
        i64::try_from(v)
            .map(|l| Captured::Value(Value::Long(l)))
            .map_err(|_| Error::unsupported_type(&format!("u64 {} exceeds the long range", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Captured> {
        Ok(Captured::Value(Value::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Captured> {
        Ok(Captured::Value(Value::Double(v)))
    }

    fn serialize_char(self, v: char) -> Result<Captured> {
        Ok(Captured::Value(Value::Char(v)))
    }

    fn serialize_str(self, v: &str) -> Result<Captured> {
        Ok(Captured::Value(Value::from(v)))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Captured> {
        if !self.human_readable {
            if let Ok(uuid) = Uuid::from_slice(v) {
                return Ok(Captured::Value(Value::Uuid(uuid)));
            }
        }
        Ok(Captured::Value(Value::List(
            v.iter().map(|&b| Value::from(b)).collect(),
        )))
    }

    fn serialize_none(self) -> Result<Captured> {
        Ok(Captured::Absent)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Captured>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Captured> {
        Ok(Captured::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Captured> {
        Ok(Captured::Absent)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Captured> {
        Ok(Captured::Value(Value::from(variant)))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Captured>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Captured>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeList> {
        Ok(SerializeList::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeList> {
        Ok(SerializeList::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeList> {
        Ok(SerializeList::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeList> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeFields> {
        Ok(SerializeFields::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeFields> {
        Ok(SerializeFields::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeFields> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeList {
    fn new(capacity: usize) -> Self {
        SerializeList {
            elements: Vec::with_capacity(capacity),
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        match capture(value)? {
            Captured::Value(Value::List(_)) => Err(Error::unsupported_type("nested lists")),
            Captured::Value(value) => {
                self.elements.push(value);
                Ok(())
            }
            Captured::Absent => Err(Error::unsupported_type("absent list elements")),
            Captured::Fields(_) => Err(Error::unsupported_type("structs or maps inside lists")),
        }
    }

    fn finish(self) -> Captured {
        Captured::Value(Value::List(self.elements))
    }
}

impl SerializeFields {
    fn new() -> Self {
        SerializeFields {
            fields: Vec::new(),
            current_key: None,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        let captured = capture(value)?;
        match captured {
            Captured::Fields(_) => check_section_key(&key)?,
            _ => check_key(&key)?,
        }
        self.fields.push((key, captured));
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Captured;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Captured> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Captured;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Captured> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Captured;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Captured> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeList {
    type Ok = Captured;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Captured> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeFields {
    type Ok = Captured;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match capture(key)? {
            Captured::Value(value) => {
                self.current_key = Some(map_key(value)?);
                Ok(())
            }
            _ => Err(Error::unsupported_type("map keys must be scalars")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.push(key, value)
    }

    fn end(self) -> Result<Captured> {
        Ok(Captured::Fields(self.fields))
    }
}

impl ser::SerializeStruct for SerializeFields {
    type Ok = Captured;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(normalize_naming(key), value)
    }

    fn end(self) -> Result<Captured> {
        Ok(Captured::Fields(self.fields))
    }
}

impl ser::SerializeStructVariant for SerializeFields {
    type Ok = Captured;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(normalize_naming(key), value)
    }

    fn end(self) -> Result<Captured> {
        Ok(Captured::Fields(self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Limits {
        #[serde(rename = "maxPlayers")]
        max_players: u16,
        ratio: f64,
    }

    #[derive(Serialize)]
    enum Mode {
        Survival,
    }

    #[derive(Serialize)]
    struct Server {
        host: String,
        port: i32,
        motd: Option<String>,
        mode: Mode,
        tags: Vec<&'static str>,
        limits: Limits,
        #[serde(skip)]
        #[allow(dead_code)]
        password: String,
    }

    fn store<T: Serialize>(section: &mut Section, object: &T) -> Result<()> {
        apply(section, capture_fields(object)?)
    }

    fn server() -> Server {
        Server {
            host: "localhost".to_string(),
            port: 25565,
            motd: None,
            mode: Mode::Survival,
            tags: vec!["a", "b"],
            limits: Limits {
                max_players: 20,
                ratio: 0.5,
            },
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn test_store_fields() {
        let mut section = Section::root();
        store(&mut section, &server()).unwrap();

        assert_eq!(section.value_as::<String>("host").as_deref(), Some("localhost"));
        assert_eq!(section.value("port"), Some(&Value::Int(25565)));
        assert_eq!(section.value("mode"), Some(&Value::from("Survival")));
        assert_eq!(section.list_as::<String>("tags").map(|t| t.len()), Some(2));
        assert!(!section.contains_key("motd"));
        assert!(!section.contains_key("password"));

        let limits = section.section("limits").unwrap();
        assert_eq!(limits.value("max players"), Some(&Value::Int(20)));
        assert_eq!(limits.value("ratio"), Some(&Value::Double(0.5)));
    }

    #[test]
    fn test_store_none_unsets_existing() {
        let mut section = Section::root();
        section.set("motd", "old");
        section.set("unrelated", 1);
        store(&mut section, &server()).unwrap();

        assert!(!section.contains_key("motd"));
        assert!(section.contains_key("unrelated"));
    }

    #[test]
    fn test_store_map() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");

        let mut section = Section::root();
        store(&mut section, &map).unwrap();
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_store_rejects_scalars() {
        let mut section = Section::root();
        assert!(matches!(
            store(&mut section, &5),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[derive(Serialize)]
    struct Player {
        id: Uuid,
        #[serde(rename = "idText")]
        id_text: String,
        friends: Vec<Uuid>,
        owner: Option<Uuid>,
    }

    #[test]
    fn test_uuid_fields_stay_uuids() {
        let id = Uuid::from_u128(0x6e8b_c430_9c3a_11d9_9669_0800_200c_9a66);
        let player = Player {
            id,
            id_text: id.to_string(),
            friends: vec![Uuid::nil(), id],
            owner: Some(id),
        };

        let mut section = Section::root();
        store(&mut section, &player).unwrap();

        assert_eq!(section.value("id"), Some(&Value::Uuid(id)));
        assert_eq!(section.value("id text"), Some(&Value::String(id.to_string())));
        assert_eq!(
            section.value("friends"),
            Some(&Value::List(vec![Value::Uuid(Uuid::nil()), Value::Uuid(id)]))
        );
        assert_eq!(section.value("owner"), Some(&Value::Uuid(id)));
    }

    #[test]
    fn test_to_value_uuid() {
        let id = Uuid::from_u128(42);
        assert_eq!(to_value(&id).unwrap(), Value::Uuid(id));
        assert_eq!(to_value(&id.to_string()).unwrap(), Value::String(id.to_string()));
        assert_eq!(to_value("not-a-uuid").unwrap(), Value::from("not-a-uuid"));
    }

    #[test]
    fn test_unusable_map_keys_rejected() {
        for key in ["a=b", "", " padded", "brace{", "line\nbreak"] {
            let mut map = BTreeMap::new();
            map.insert(key, 1);

            let mut section = Section::root();
            assert!(
                matches!(store(&mut section, &map), Err(Error::InvalidKey(_))),
                "{:?} should be rejected",
                key
            );
            assert!(section.is_empty());
        }
    }

    #[test]
    fn test_field_normalized_to_nothing_rejected() {
        #[derive(Serialize)]
        struct Odd {
            #[serde(rename = "__")]
            underscores: i32,
        }

        assert!(matches!(
            capture_fields(&Odd { underscores: 1 }),
            Err(Error::InvalidKey(ref k)) if k.is_empty()
        ));
    }

    #[test]
    fn test_root_name_only_for_scalars() {
        let mut scalars = BTreeMap::new();
        scalars.insert("~root", 1);
        assert!(capture_fields(&scalars).is_ok());

        let mut nested = BTreeMap::new();
        nested.insert("~root", BTreeMap::from([("x", 1)]));
        assert!(matches!(
            capture_fields(&nested),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn test_nested_lists_rejected() {
        assert!(to_value(&vec![vec![1]]).is_err());
    }

    #[test]
    fn test_to_value_numbers() {
        assert_eq!(to_value(&-3i8).unwrap(), Value::Byte(-3));
        assert_eq!(to_value(&70_000u32).unwrap(), Value::Long(70_000));
        assert!(to_value(&u64::MAX).is_err());
        assert_eq!(to_value(&(1, 'x')).unwrap(), Value::List(vec![Value::Int(1), Value::Char('x')]));
    }

    #[test]
    fn test_normalize_naming() {
        assert_eq!(normalize_naming("simple"), "simple");
        assert_eq!(normalize_naming("camelCaseName"), "camel case name");
        assert_eq!(normalize_naming("snake__case"), "snake case");
        assert_eq!(normalize_naming("with-dash.and.dots"), "with dash and dots");
        assert_eq!(normalize_naming("   "), "   ");
        assert_eq!(normalize_naming("~root"), "root");
    }
}
