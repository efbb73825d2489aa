//! # datascript
//!
//! A reader and writer for DataScript, a brace-delimited, type-tagged
//! configuration format, and the mutable node tree it loads into.
//!
//! ## What is DataScript?
//!
//! A DataScript file is a tree of named scalars and sections. Every literal
//! carries its own type, so values read back exactly as they were written:
//!
//! ```text
//! name = 'demo'
//! id = uuid('6e8bc430-9c3a-11d9-9669-0800200c9a66')
//! port = 8080
//! timeout = 30000L
//! ratio = 0.75D
//! server {
//!   motd = "Hello"
//!   tags = [
//!     'fast',
//!     'eu'
//!   ]
//!   limits {}
//! }
//! ```
//!
//! See [`format`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Typed literals**: booleans, ints, longs, doubles, shorts, bytes,
//!   characters, UUIDs, strings and lists
//! - **Ordered tree**: sections keep their children in insertion order and
//!   writing is deterministic
//! - **Lenient parsing**: malformed lines are skipped by default, or rejected
//!   with [`Options::strict`]
//! - **Serde bridge**: [`Section::store`] writes any `T: Serialize` into a
//!   section
//!
//! ## Quick Start
//!
//! ```rust
//! use datascript::{from_str, to_string, Value};
//!
//! let text = "name = 'demo'\nserver {\n  port = 8080\n}\n";
//! let mut root = from_str(text);
//!
//! assert_eq!(root.value("name"), Some(&Value::from("demo")));
//!
//! root.section_mut("server").unwrap().set("port", 9090);
//! assert_eq!(to_string(&root).unwrap(), "name = 'demo'\nserver {\n  port = 9090\n}\n");
//! ```
//!
//! ### Working with Files
//!
//! ```rust
//! use datascript::Configuration;
//!
//! let dir = std::env::temp_dir().join("datascript-doc-lib");
//! std::fs::create_dir_all(&dir).unwrap();
//!
//! let mut config = Configuration::new(dir.join("app.ds"));
//! config.load().unwrap(); // a missing file loads nothing
//! config.root_mut().with_section("window", |window| {
//!     window.set("width", 1280);
//!     window.set("fullscreen", false);
//! }).unwrap();
//! config.save().unwrap();
//! # std::fs::remove_dir_all(&dir).unwrap();
//! ```
//!
//! ### Strict Parsing
//!
//! ```rust
//! use datascript::{from_str_with_options, Error, Options};
//!
//! let err = from_str_with_options("ok = 1\nnot a node\n", &Options::strict()).unwrap_err();
//! assert!(matches!(err, Error::Malformed { line: 2, .. }));
//! ```
//!
//! ## Logging
//!
//! Skipped lines, unclosed blocks and file loads are reported through
//! [`tracing`] at debug level. Install a subscriber to see them.

pub mod config;
pub mod error;
pub mod format;
pub mod literal;
pub mod map;
pub mod node;
pub mod options;
pub mod parser;
pub mod section;
pub mod ser;
pub mod value;
pub mod writer;

pub use config::{Configuration, ConfigurationBuilder};
pub use error::{Error, Result};
pub use map::NodeMap;
pub use node::{is_reserved, is_valid_key, Node, Scalar, Section, ROOT_NAME};
pub use options::{Options, Quote};
pub use parser::Parser;
pub use ser::{normalize_naming, to_value};
pub use value::Value;
pub use writer::Writer;

use std::io;

/// Parses text into a new root section, skipping malformed lines.
///
/// # Examples
///
/// ```rust
/// use datascript::from_str;
///
/// let root = from_str("a = 1\nbroken\nb = 2\n");
/// assert_eq!(root.keys().collect::<Vec<_>>(), vec!["a", "b"]);
/// ```
#[must_use]
pub fn from_str(s: &str) -> Section {
    let mut root = Section::root();
    // Byte slices cannot fail to read and lenient mode skips bad lines.
    if let Err(e) = Parser::new(s.as_bytes(), &Options::default()).parse_into(&mut root) {
        tracing::debug!(error = %e, "unexpected error parsing in-memory text");
    }
    root
}

/// Parses text into a new root section with custom options.
///
/// # Errors
///
/// In strict mode, returns [`Error::Malformed`] for the first malformed line.
pub fn from_str_with_options(s: &str, options: &Options) -> Result<Section> {
    from_reader_with_options(s.as_bytes(), options)
}

/// Parses a stream into a new root section, skipping malformed lines.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails.
pub fn from_reader<R: io::BufRead>(reader: R) -> Result<Section> {
    from_reader_with_options(reader, &Options::default())
}

/// Parses a stream into a new root section with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, and in strict mode
/// [`Error::Malformed`] for the first malformed line.
pub fn from_reader_with_options<R: io::BufRead>(reader: R, options: &Options) -> Result<Section> {
    let mut root = Section::root();
    Parser::new(reader, options).parse_into(&mut root)?;
    Ok(root)
}

/// Writes the children of `section` as text.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if a name in the tree would not read back
/// as itself.
///
/// # Examples
///
/// ```rust
/// use datascript::{to_string, Section};
///
/// let mut root = Section::root();
/// root.set("tags", vec!["a", "b"]);
/// assert_eq!(to_string(&root).unwrap(), "tags = [\n  'a',\n  'b'\n]\n");
/// ```
pub fn to_string(section: &Section) -> Result<String> {
    to_string_with_options(section, &Options::default())
}

/// Writes the children of `section` as text with custom options.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if a name in the tree would not read back
/// as itself.
pub fn to_string_with_options(section: &Section, options: &Options) -> Result<String> {
    let mut writer = Writer::new(options);
    writer.write_section(section, 0)?;
    Ok(writer.into_inner())
}

/// Writes the children of `section` to a stream.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] for an unwritable name, in which case
/// nothing is written, or [`Error::Io`] if writing fails.
pub fn to_writer<W: io::Write>(writer: W, section: &Section) -> Result<()> {
    to_writer_with_options(writer, section, &Options::default())
}

/// Writes the children of `section` to a stream with custom options.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] for an unwritable name, in which case
/// nothing is written, or [`Error::Io`] if writing fails.
pub fn to_writer_with_options<W: io::Write>(
    mut writer: W,
    section: &Section,
    options: &Options,
) -> Result<()> {
    writer
        .write_all(to_string_with_options(section, options)?.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Window {
        width: i32,
        height: i32,
        title: String,
    }

    #[test]
    fn test_round_trip() {
        let text = "a = true\nb {\n  c = 'x'\n  d {}\n}\ne = [\n  1L,\n  2L\n]\n";
        assert_eq!(to_string(&from_str(text)).unwrap(), text);
    }

    #[test]
    fn test_store_and_write() {
        let mut root = Section::root();
        root.store(
            "window",
            &Window {
                width: 800,
                height: 600,
                title: "Main".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            to_string(&root).unwrap(),
            "window {\n  width = 800\n  height = 600\n  title = 'Main'\n}\n"
        );
    }

    #[test]
    fn test_to_writer() {
        let mut root = Section::root();
        root.set("x", 'c');

        let mut buffer = Vec::new();
        to_writer(&mut buffer, &root).unwrap();
        assert_eq!(buffer, b"x = 'c'C\n");
    }

    #[test]
    fn test_from_reader() {
        let root = from_reader(std::io::Cursor::new("n = 5S\n")).unwrap();
        assert_eq!(root.value("n"), Some(&Value::Short(5)));
    }

    #[test]
    fn test_double_quote_option() {
        let mut root = Section::root();
        root.set("s", "v");
        let options = Options::new().with_quote(Quote::Double);
        assert_eq!(to_string_with_options(&root, &options).unwrap(), "s = \"v\"\n");
    }

    #[test]
    fn test_to_writer_rejects_bad_name_before_writing() {
        let mut root = Section::root();
        root.set("ok", 1);
        root.set("not=ok", 2);

        let mut buffer = Vec::new();
        let err = to_writer(&mut buffer, &root).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(ref k) if k == "not=ok"));
        assert!(buffer.is_empty());
    }
}
