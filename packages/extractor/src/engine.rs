//! Extraction engine that resolves a whole configuration against a document.

use std::path::Path;

use scraper::{Html, Selector};

use crate::config::Configuration;
use crate::content::ContentType;
use crate::document::{parse_from_file, parse_from_string, parse_from_transport};
use crate::error::Result;
use crate::http::Transport;
use crate::registry::{Formatter, FormatterRegistry};
use crate::resolver::{Context, Resolver};
use crate::types::Record;

/// Extracts records from documents using a fixed configuration.
///
/// The configuration and formatter registry are read-only after
/// construction, so one extractor can serve many documents, including from
/// several threads at once.
///
/// # Example
///
/// ```
/// use dom_extractor::{Extractor, Value};
///
/// let extractor = Extractor::from_yaml_str(
///     "title:\n  selector: h1\nlinks:\n  selector: a\n  type: Link\n  multiple: true\n",
///     Vec::new(),
/// )
/// .unwrap();
///
/// let record = extractor.extract(r#"<h1> Hello </h1><a href="/a">A</a><a href="/b">B</a>"#);
/// assert_eq!(record["title"], Value::from("Hello"));
/// assert_eq!(record["links"], Value::from(vec!["/a", "/b"]));
/// ```
#[derive(Debug)]
pub struct Extractor {
    config: Configuration,
    formatters: FormatterRegistry,
}

impl Extractor {
    /// Create an extractor from a configuration and formatters.
    ///
    /// # Errors
    /// Returns `InvalidFormatter` if a formatter has an invalid name.
    pub fn new(
        config: Configuration,
        formatters: impl IntoIterator<Item = Box<dyn Formatter>>,
    ) -> Result<Self> {
        Self::with_registry(config, FormatterRegistry::from_formatters(formatters)?)
    }

    /// Create an extractor around an existing formatter registry.
    ///
    /// # Errors
    /// Currently infallible; kept fallible to match [`Extractor::new`].
    pub fn with_registry(config: Configuration, formatters: FormatterRegistry) -> Result<Self> {
        check_configuration(&config, &formatters);
        Ok(Self { config, formatters })
    }

    /// Create an extractor from YAML configuration text.
    ///
    /// # Errors
    /// Returns `ConfigFormat` for malformed YAML, `InvalidFormatter` for an
    /// invalid formatter.
    pub fn from_yaml_str(
        yaml: &str,
        formatters: impl IntoIterator<Item = Box<dyn Formatter>>,
    ) -> Result<Self> {
        Self::new(Configuration::from_yaml_str(yaml)?, formatters)
    }

    /// Create an extractor from a YAML configuration file.
    ///
    /// # Errors
    /// Returns `ConfigRead` if the file can't be read, `ConfigFormat` for
    /// malformed YAML, `InvalidFormatter` for an invalid formatter.
    pub fn from_yaml_file(
        path: impl AsRef<Path>,
        formatters: impl IntoIterator<Item = Box<dyn Formatter>>,
    ) -> Result<Self> {
        Self::new(Configuration::from_yaml_file(path)?, formatters)
    }

    /// Extract a record from markup held in memory.
    #[must_use]
    pub fn extract(&self, markup: &str) -> Record {
        self.extract_document(&parse_from_string(markup))
    }

    /// Extract a record from an already parsed document.
    #[must_use]
    pub fn extract_document(&self, document: &Html) -> Record {
        let record = Resolver::new(&self.formatters)
            .resolve_fields(self.config.fields(), Context::Document(document));
        tracing::debug!(fields = record.len(), "Extracted record");
        record
    }

    /// Extract a record from a local file.
    ///
    /// # Errors
    /// Returns `DocumentLoad` if the file can't be read.
    pub fn extract_from_file(&self, path: impl AsRef<Path>) -> Result<Record> {
        let document = parse_from_file(path)?;
        Ok(self.extract_document(&document))
    }

    /// Extract a record from a document retrieved through a transport.
    ///
    /// # Errors
    /// Propagates the transport's fetch error.
    pub fn extract_from_source(&self, url: &str, transport: &dyn Transport) -> Result<Record> {
        let document = parse_from_transport(url, transport)?;
        Ok(self.extract_document(&document))
    }

    /// The configuration this extractor resolves.
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// All registered formatters.
    #[must_use]
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Get a registered formatter by name.
    #[must_use]
    pub fn formatter(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name)
    }
}

/// Report configuration problems that resolution will silently absorb.
///
/// Nothing here fails construction: malformed selectors still match nothing
/// and unregistered formatters are still skipped.
fn check_configuration(config: &Configuration, formatters: &FormatterRegistry) {
    config.walk(|path, spec| {
        if let Some(selector) = spec.selector.as_deref() {
            if let Err(err) = Selector::parse(selector) {
                tracing::warn!(field = path, selector, error = %err, "Malformed selector will match nothing");
            }
        }

        if spec.is_composite() {
            return;
        }

        if spec.content_type == ContentType::Attribute
            && !matches!(spec.attribute.as_deref(), Some(a) if !a.is_empty())
        {
            tracing::warn!(field = path, "Attribute type without attribute name yields no content");
        }

        for name in spec.format.iter() {
            if !formatters.has_formatter(name) {
                tracing::warn!(field = path, formatter = name, "Formatter not registered, will be skipped");
            }
        }
    });
}
