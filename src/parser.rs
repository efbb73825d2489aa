//! Text to tree.
//!
//! The [`Parser`] reads lines from any [`BufRead`] source and rebuilds the
//! node tree by recursive descent over nesting depth:
//!
//! - A line at depth `d` must start with `d` two-space indents
//! - `name = literal` produces a scalar; a literal opening a list with `[`
//!   keeps consuming lines until one ends with `]`
//! - `name {` opens a section whose children are parsed at `d + 1` until a
//!   line that is exactly `}`
//! - `name {}` is an empty section
//!
//! Blank lines are skipped. Anything else is malformed: by default it is
//! logged and skipped so one bad line never costs the rest of the file; with
//! [`Options::strict`] it aborts parsing instead.
//!
//! ## Examples
//!
//! ```rust
//! use datascript::{Options, Parser, Section, Value};
//!
//! let text = "name = 'demo'\nserver {\n  port = 8080\n}\n";
//!
//! let mut root = Section::root();
//! Parser::new(text.as_bytes(), &Options::new()).parse_into(&mut root).unwrap();
//!
//! assert_eq!(root.value("name"), Some(&Value::from("demo")));
//! assert_eq!(root.section("server").and_then(|s| s.value_as::<i32>("port")), Some(8080));
//! ```

use crate::literal;
use crate::node::is_reserved;
use crate::{Error, Node, Options, Result, Scalar, Section};
use std::io::{BufRead, Lines};

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Parses text into a section.
pub struct Parser<R> {
    lines: Lines<R>,
    line: usize,
    strict: bool,
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R, options: &Options) -> Self {
        Parser {
            lines: reader.lines(),
            line: 0,
            strict: options.strict,
        }
    }

    /// Parses every remaining line, adding the resulting nodes to `root`.
    ///
    /// A node whose name is already present replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading a line fails, and in strict mode
    /// [`Error::Malformed`] for the first malformed line.
    pub fn parse_into(&mut self, root: &mut Section) -> Result<()> {
        while let Some(raw) = self.next_line()? {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(node) = self.parse_node(line, 0)? {
                root.insert_node(node);
            }
        }
        Ok(())
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(Ok(line)) => {
                self.line += 1;
                Ok(Some(line))
            }
            Some(Err(e)) => Err(Error::from(e)),
            None => Ok(None),
        }
    }

    /// Parses one line at `depth`. `Ok(None)` means the line produced no node.
    fn parse_node(&mut self, line: &str, depth: usize) -> Result<Option<Node>> {
        let indent = INDENT.repeat(depth);
        let Some(rest) = line.strip_prefix(indent.as_str()) else {
            return self.malformed(line, "indented less than its section");
        };
        let rest = rest.trim();

        let Some((name, value)) = rest.split_once('=') else {
            return self.parse_section_line(rest, depth);
        };

        let key = strip_braces(name);
        let value = value.trim();
        let literal = if value.starts_with('[') && !value.ends_with(']') {
            self.collect_list(value)?
        } else {
            value.to_string()
        };

        if key.is_empty() {
            return self.malformed(line, "missing name before '='");
        }

        Ok(Some(Node::Scalar(Scalar::new(
            key,
            literal::classify(&literal),
        ))))
    }

    fn parse_section_line(&mut self, rest: &str, depth: usize) -> Result<Option<Node>> {
        let key = strip_braces(rest);

        let section = if rest.ends_with('{') {
            self.parse_block(&key, depth)?
        } else if rest.ends_with("{}") {
            Section::new(key.as_str())
        } else {
            return self.malformed(rest, "expected 'name = value' or a section");
        };

        // The block is consumed either way so its children stay inside it.
        if key.is_empty() {
            return self.malformed(rest, "missing section name");
        }
        if is_reserved(&key) {
            return self.malformed(rest, "the root section name is reserved");
        }

        Ok(Some(Node::Section(section)))
    }

    /// Parses the children of a section opened at `depth`, up to and including
    /// the closing `}`.
    fn parse_block(&mut self, key: &str, depth: usize) -> Result<Section> {
        let mut section = Section::new(key);

        while let Some(raw) = self.next_line()? {
            let trimmed = raw.trim();
            if trimmed == "}" {
                return Ok(section);
            }
            if trimmed.is_empty() {
                continue;
            }

            if let Some(child) = self.parse_node(raw.trim_end(), depth + 1)? {
                section.insert_node(child);
            }
        }

        if self.strict {
            return Err(Error::malformed(
                self.line,
                key,
                "section not closed before end of input",
            ));
        }
        tracing::debug!(section = key, "section not closed before end of input");
        Ok(section)
    }

    /// Joins the lines of a multi-line list until one ends with `]`.
    fn collect_list(&mut self, first: &str) -> Result<String> {
        let start = self.line;
        let mut content = first.to_string();

        while !content.ends_with(']') {
            match self.next_line()? {
                Some(raw) => {
                    tracing::trace!(line = self.line, "list continuation");
                    content.push_str(raw.trim());
                }
                None if self.strict => {
                    return Err(Error::malformed(
                        start,
                        first,
                        "list not closed before end of input",
                    ));
                }
                None => {
                    tracing::debug!(line = start, "list not closed before end of input");
                    break;
                }
            }
        }

        Ok(content)
    }

    fn malformed<T>(&self, content: &str, msg: &str) -> Result<Option<T>> {
        if self.strict {
            return Err(Error::malformed(self.line, content, msg));
        }
        tracing::debug!(line = self.line, content, msg, "skipping malformed line");
        Ok(None)
    }
}

fn strip_braces(name: &str) -> String {
    name.replace(['{', '}'], "").trim().to_string()
}
