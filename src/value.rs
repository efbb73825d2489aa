//! Typed scalar values.
//!
//! This module provides the [`Value`] enum, the closed set of types a scalar
//! node can hold. Every variant has exactly one literal form (see
//! [`crate::literal`]), so the type of a value survives a save/load cycle.
//!
//! | Variant | Rust type | Literal |
//! |---------|-----------|---------|
//! | `Bool` | `bool` | `true` |
//! | `Int` | `i32` | `42` |
//! | `Long` | `i64` | `42L` |
//! | `Double` | `f64` | `3.5D` |
//! | `Short` | `i16` | `7S` |
//! | `Byte` | `i8` | `7B` |
//! | `Char` | `char` | `'x'C` |
//! | `Uuid` | `uuid::Uuid` | `uuid('...')` |
//! | `String` | `String` | `'text'` |
//! | `List` | `Vec<Value>` | `[ ... ]` |
//!
//! ## Examples
//!
//! ```rust
//! use datascript::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_int());
//! assert_eq!(value.as_i64(), Some(42));
//! assert_eq!(value.to_string(), "42");
//!
//! let list = Value::from(vec![1i64, 2i64]);
//! assert_eq!(list.as_list().map(|l| l.len()), Some(2));
//! ```

use crate::literal;
use crate::options::Quote;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// A typed scalar value, or a list of them.
///
/// Lists are flat: the format has no nested list syntax, so a `List` element
/// is expected to be one of the non-list variants. Elements may mix types.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Short(i16),
    Byte(i8),
    Char(char),
    Uuid(Uuid),
    String(String),
    List(Vec<Value>),
}

impl Value {
    /// Returns a short lowercase name of the variant, used in error messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Value;
    ///
    /// assert_eq!(Value::from(1i64).kind(), "long");
    /// assert_eq!(Value::from("x").kind(), "string");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::Short(_) => "short",
            Value::Byte(_) => "byte",
            Value::Char(_) => "char",
            Value::Uuid(_) => "uuid",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Value::Long(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_short(&self) -> bool {
        matches!(self, Value::Short(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_byte(&self) -> bool {
        matches!(self, Value::Byte(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_char(&self) -> bool {
        matches!(self, Value::Char(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_uuid(&self) -> bool {
        matches!(self, Value::Uuid(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` for any of the integer variants.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Long(_) | Value::Short(_) | Value::Byte(_)
        )
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an `i64` if it is any integer variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Value;
    ///
    /// assert_eq!(Value::Byte(7).as_i64(), Some(7));
    /// assert_eq!(Value::Long(-3).as_i64(), Some(-3));
    /// assert_eq!(Value::Double(1.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(i64::from(*i)),
            Value::Long(l) => Some(*l),
            Value::Short(s) => Some(i64::from(*s)),
            Value::Byte(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Returns the value as an `i32` if it is an `Int`, `Short` or `Byte`.
    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Short(s) => Some(i32::from(*s)),
            Value::Byte(b) => Some(i32::from(*b)),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Value::Uuid(u) => Some(u),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Formats the value as its literal, using single quotes for strings.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&literal::render(self, Quote::Single))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i32(*i),
            Value::Long(l) => serializer.serialize_i64(*l),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::Short(s) => serializer.serialize_i16(*s),
            Value::Byte(b) => serializer.serialize_i8(*b),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::Uuid(u) => u.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(list) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}

fn mismatch(expected: &str, found: &Value) -> crate::Error {
    crate::Error::custom(format!("expected {}, found {}", expected, found.kind()))
}

// TryFrom implementations for extracting values; integer targets accept
// any narrower integer variant.
impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_bool().ok_or_else(|| mismatch("bool", &value))
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| mismatch("long", &value))
    }
}

impl TryFrom<Value> for i32 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_i32().ok_or_else(|| mismatch("int", &value))
    }
}

impl TryFrom<Value> for i16 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Short(s) => Ok(s),
            Value::Byte(b) => Ok(i16::from(b)),
            other => Err(mismatch("short", &other)),
        }
    }
}

impl TryFrom<Value> for i8 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Byte(b) => Ok(b),
            other => Err(mismatch("byte", &other)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| mismatch("double", &value))
    }
}

impl TryFrom<Value> for char {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_char().ok_or_else(|| mismatch("char", &value))
    }
}

impl TryFrom<Value> for Uuid {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Uuid(u) => Ok(u),
            other => Err(mismatch("uuid", &other)),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Byte(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Short(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Short(i16::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(i32::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Long(i64::from(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Double(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}
