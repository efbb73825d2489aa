//! File-backed configuration.
//!
//! A [`Configuration`] pairs a root [`Section`] with the file it is loaded
//! from and saved to.
//!
//! ## Examples
//!
//! ```rust
//! use datascript::Configuration;
//!
//! let dir = std::env::temp_dir().join("datascript-doc-config");
//! std::fs::create_dir_all(&dir).unwrap();
//! let path = dir.join("server.ds");
//!
//! let mut config = Configuration::new(&path);
//! config.root_mut().set("port", 8080);
//! config.save().unwrap();
//!
//! let mut reloaded = Configuration::new(&path);
//! reloaded.load().unwrap();
//! assert_eq!(reloaded.root().value_as::<i32>("port"), Some(8080));
//! # std::fs::remove_dir_all(&dir).unwrap();
//! ```

use crate::{Error, Options, Parser, Result, Section, Writer};
use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// A root section bound to a file.
#[derive(Clone, Debug)]
pub struct Configuration {
    file: PathBuf,
    root: Section,
    options: Options,
}

impl Configuration {
    /// Creates an empty configuration for `file`. Nothing is read until
    /// [`Configuration::load`].
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Configuration {
            file: file.into(),
            root: Section::root(),
            options: Options::default(),
        }
    }

    /// Returns a builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use datascript::{Configuration, Options};
    ///
    /// let config = Configuration::builder()
    ///     .file("app.ds")
    ///     .options(Options::strict())
    ///     .build()
    ///     .unwrap();
    /// assert!(config.options().strict);
    ///
    /// assert!(Configuration::builder().build().is_err());
    /// ```
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    #[must_use]
    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Section {
        &mut self.root
    }

    /// Replaces the tree with the contents of the file.
    ///
    /// A missing file is not an error: the tree is left as it is. On failure
    /// the previous tree is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read, and in
    /// strict mode [`Error::Malformed`] for the first malformed line.
    pub fn load(&mut self) -> Result<()> {
        let file = match fs::File::open(&self.file) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.file.display(), "configuration file missing, nothing loaded");
                return Ok(());
            }
            Err(e) => return Err(Error::from(e)),
        };

        let mut root = Section::root();
        let mut parser = Parser::new(BufReader::new(file), &self.options);
        parser.parse_into(&mut root)?;

        tracing::debug!(
            path = %self.file.display(),
            lines = parser.line(),
            nodes = root.len(),
            "loaded configuration"
        );
        self.root = root;
        Ok(())
    }

    /// Replaces the tree with the contents of `text`.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`Error::Malformed`] for the first malformed
    /// line; the previous tree is kept.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut root = Section::root();
        Parser::new(text.as_bytes(), &self.options).parse_into(&mut root)?;
        self.root = root;
        Ok(())
    }

    /// Writes the tree to the file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if a name in the tree cannot be written,
    /// leaving the file untouched, or [`Error::Io`] if the file cannot be
    /// written.
    pub fn save(&self) -> Result<()> {
        let text = self.save_to_string()?;
        fs::write(&self.file, text)?;
        tracing::debug!(path = %self.file.display(), nodes = self.root.len(), "saved configuration");
        Ok(())
    }

    /// Renders the tree as text without touching the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if a name in the tree cannot be written.
    pub fn save_to_string(&self) -> Result<String> {
        let mut writer = Writer::new(&self.options);
        writer.write_section(&self.root, 0)?;
        Ok(writer.into_inner())
    }

    /// Removes every node from the tree.
    pub fn clear(&mut self) {
        self.root.clear();
    }
}

/// Builder for [`Configuration`]. The file is required.
#[derive(Clone, Debug, Default)]
pub struct ConfigurationBuilder {
    file: Option<PathBuf>,
    options: Options,
}

impl ConfigurationBuilder {
    #[must_use]
    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::Custom`] if no file was given.
    pub fn build(self) -> Result<Configuration> {
        let file = self
            .file
            .ok_or_else(|| Error::custom("a configuration needs a file"))?;
        Ok(Configuration::new(file).with_options(self.options))
    }
}
