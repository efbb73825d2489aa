//! DataScript Format Reference
//!
//! This module documents the DataScript text format as read by
//! [`crate::Parser`] and written by [`crate::Writer`].
//!
//! # Overview
//!
//! A document is a sequence of lines describing a tree. Each line is a
//! scalar assignment, a section opener, or a section closer. Indentation is
//! two spaces per nesting level.
//!
//! ```text
//! name = 'demo'
//! server {
//!   port = 8080
//!   limits {}
//! }
//! ```
//!
//! # Nodes
//!
//! | Line | Meaning |
//! |------|---------|
//! | `name = literal` | Scalar. The line is split on the first `=` |
//! | `name {` | Opens a section; children follow one level deeper |
//! | `}` | Closes the innermost open section |
//! | `name {}` | Empty section |
//! | blank | Ignored |
//!
//! **Rules**:
//! - Braces are stripped from names, then names are trimmed
//! - Names are unique within a section; a repeated name replaces the earlier node
//! - The root name `~root` is reserved for sections (case-insensitive)
//! - Children keep insertion order, which is also the write order
//!
//! # Literals
//!
//! Literals are classified by the first matching rule:
//!
//! | Order | Pattern | Type | Example |
//! |-------|---------|------|---------|
//! | 1 | `true` / `false`, any case | Bool | `true` |
//! | 2 | `uuid('…')` | UUID | `uuid('6e8bc430-9c3a-11d9-9669-0800200c9a66')` |
//! | 3 | `'…'` or `"…"` | String | `'hello'` |
//! | 4 | digits | Int | `-42` |
//! | 5 | digits + `L` | Long | `42L` |
//! | 6 | decimal + `D` | Double | `3.5D` |
//! | 7 | `'c'C` | Char | `'x'C` |
//! | 8 | digits + `S` | Short | `7S` |
//! | 9 | digits + `B` | Byte | `-1B` |
//! | 10 | `[ … ]` | List | `[1, 'a']` |
//! | 11 | anything else | String, verbatim | `hello world` |
//!
//! Numbers accept one leading `-`. A number too large for its type is kept as
//! a verbatim string. Doubles are always written with a `.`; the
//! non-finite values are `NaND`, `InfinityD` and `-InfinityD`.
//!
//! ## Strings
//!
//! Strings are written in the configured quote character (single by default).
//! Either quote style is read.
//!
//! | Escape | Character |
//! |--------|-----------|
//! | `\\` | backslash |
//! | `\'` `\"` | quote |
//! | `\n` `\r` `\t` | newline, carriage return, tab |
//!
//! Unknown escapes are kept as written.
//!
//! # Lists
//!
//! A literal starting with `[` that does not end with `]` continues on the
//! following lines until one ends with `]`. Elements are separated by commas
//! outside quotes and classified independently, so one list may mix types:
//!
//! ```text
//! mixed = [
//!   1,
//!   'two',
//!   3L,
//!   'c'C
//! ]
//! empty = []
//! ```
//!
//! Lists are always written one element per line. Lists do not nest: a
//! bracketed element is written inline and reads back as a string.
//!
//! # Leniency
//!
//! By default malformed input is skipped and logged:
//!
//! - A line that is neither an assignment nor a section
//! - An assignment or section with an empty name
//! - A section named `~root`, together with its block
//! - A child indented less than its section
//! - A list or section still open at the end of input is closed there
//!
//! With [`crate::Options::strict`] each of these is an
//! [`crate::Error::Malformed`] carrying the line number.
//!
//! # Limitations
//!
//! - No comments
//! - One document per file
//! - Names containing `=`, braces or line breaks do not round-trip
