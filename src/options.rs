//! Configuration options for parsing and writing.
//!
//! - [`Options`]: Main configuration struct
//! - [`Quote`]: Quote character used when writing string literals
//!
//! ## Examples
//!
//! ```rust
//! use datascript::{Options, Quote, Section, to_string_with_options};
//!
//! let mut root = Section::root();
//! root.set("name", "Alice");
//!
//! let options = Options::new().with_quote(Quote::Double);
//! assert_eq!(to_string_with_options(&root, &options).unwrap(), "name = \"Alice\"\n");
//! ```

/// Quote character for string literals.
///
/// Both styles are always accepted when parsing; this only selects what the
/// writer emits.
///
/// # Examples
///
/// ```rust
/// use datascript::Quote;
///
/// assert_eq!(Quote::Single.as_char(), '\'');
/// assert_eq!(Quote::Double.as_char(), '"');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Quote {
    #[default]
    Single,
    Double,
}

impl Quote {
    /// Returns the quote character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// Options controlling how text is parsed and written.
///
/// # Examples
///
/// ```rust
/// use datascript::{Options, Quote};
///
/// // Lenient parsing, single-quoted strings
/// let options = Options::new();
/// assert!(!options.strict);
///
/// // Reject malformed lines instead of skipping them
/// let options = Options::strict().with_quote(Quote::Double);
/// assert!(options.strict);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub quote: Quote,
    pub strict: bool,
}

impl Options {
    /// Creates default options (lenient parsing, single quotes).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that turn malformed lines into errors.
    #[must_use]
    pub fn strict() -> Self {
        Options {
            strict: true,
            ..Default::default()
        }
    }

    /// Sets the quote character for written string literals.
    #[must_use]
    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }

    /// Enables or disables strict parsing.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
