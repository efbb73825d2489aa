//! Tree to text.
//!
//! The [`Writer`] is the inverse of [`crate::Parser`]. Each child of a
//! section becomes one line (or block) indented by two spaces per depth, in
//! the section's insertion order:
//!
//! ```text
//! name = 'literal'
//! empty {}
//! server {
//!   port = 8080
//! }
//! list = [
//!   1,
//!   'two'
//! ]
//! ```
//!
//! A name that would not read back as itself (see [`crate::is_valid_key`]),
//! or a section named like the root, fails the write with
//! [`crate::Error::InvalidKey`].
//!
//! ## Examples
//!
//! ```rust
//! use datascript::{Options, Section, Writer};
//!
//! let mut root = Section::root();
//! root.set("age", 30);
//! root.create_section("empty").unwrap();
//!
//! let mut writer = Writer::new(&Options::new());
//! writer.write_section(&root, 0).unwrap();
//! assert_eq!(writer.into_inner(), "age = 30\nempty {}\n");
//! ```

use crate::literal;
use crate::node::{check_key, check_section_key};
use crate::parser::INDENT;
use crate::{Node, Options, Quote, Result, Section};

/// Writes sections as text.
pub struct Writer {
    output: String,
    quote: Quote,
}

impl Writer {
    pub fn new(options: &Options) -> Self {
        Writer {
            output: String::with_capacity(256),
            quote: options.quote,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the children of `section`, indented for `depth`. The section's
    /// own name is not written; for the root pass depth 0.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidKey`] for the first child whose name
    /// cannot be written. Output already produced stays in the buffer.
    pub fn write_section(&mut self, section: &Section, depth: usize) -> Result<()> {
        let indent = INDENT.repeat(depth);

        for node in section.nodes() {
            if node.is_section() {
                check_section_key(node.name())?;
            } else {
                check_key(node.name())?;
            }
            self.output.push_str(&indent);
            self.output.push_str(node.name());

            match node {
                Node::Scalar(scalar) => {
                    self.output.push_str(" = ");
                    self.output
                        .push_str(&literal::render_at(scalar.value(), self.quote, &indent));
                    self.output.push('\n');
                }
                Node::Section(child) if child.is_empty() => {
                    self.output.push_str(" {}\n");
                }
                Node::Section(child) => {
                    self.output.push_str(" {\n");
                    self.write_section(child, depth + 1)?;
                    self.output.push_str(&indent);
                    self.output.push_str("}\n");
                }
            }
        }
        Ok(())
    }
}
