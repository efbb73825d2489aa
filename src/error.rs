//! Error types for loading, saving and mutating configurations.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading or writing the underlying file or stream failed
//! - **Invalid Keys**: a name that does not survive a save/load cycle, or a
//!   section named after the reserved root sentinel
//! - **Malformed Lines**: only raised in strict mode, the default parser skips them
//! - **Unsupported Types**: a value handed to `store` has no literal form
//!
//! Typed accessors on a section never fail; a mismatched type falls back to the
//! caller's default (or `None`).
//!
//! ## Examples
//!
//! ```rust
//! use datascript::{Configuration, Error};
//!
//! let mut config = Configuration::new("app.ds");
//! let err = config.root_mut().create_section("~root").unwrap_err();
//! assert!(matches!(err, Error::InvalidKey(_)));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A name that cannot be written back, or a section named after the root
    #[error("Invalid key {0:?}: not usable as a node name")]
    InvalidKey(String),

    /// Malformed line, reported in strict mode only
    #[error("Malformed line {line}: {msg}\n{content}")]
    Malformed {
        line: usize,
        content: String,
        msg: String,
    },

    /// Unsupported type for storing into a section
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates an invalid key error for the given key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Error;
    ///
    /// let err = Error::invalid_key("~ROOT");
    /// assert!(err.to_string().contains("\"~ROOT\""));
    /// ```
    pub fn invalid_key(key: &str) -> Self {
        Error::InvalidKey(key.to_string())
    }

    /// Creates a malformed line error with the offending line's content.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::Error;
    ///
    /// let err = Error::malformed(3, "= 5", "missing name");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn malformed(line: usize, content: &str, msg: &str) -> Self {
        Error::Malformed {
            line,
            content: content.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported type error for values with no literal form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
