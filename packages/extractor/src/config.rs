//! Configuration constants and the field-mapping configuration.

use std::fs;
use std::path::Path;

use crate::error::{ExtractorError, Result};
use crate::field::{FieldMap, FieldSpec};

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// User agent string sent by the HTTP transport.
pub const USER_AGENT: &str = concat!("dom-extractor/", env!("CARGO_PKG_VERSION"));

/// Parsed field mapping, immutable once built.
///
/// # Examples
/// ```
/// use dom_extractor::Configuration;
///
/// let config = Configuration::from_yaml_str("title:\n  selector: h1\n").unwrap();
/// assert_eq!(config.names().collect::<Vec<_>>(), vec!["title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    fields: FieldMap,
}

impl Configuration {
    /// Wrap an already built field mapping.
    #[must_use]
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    /// Decode a configuration from YAML text.
    ///
    /// Empty text or a bare `~` yields an empty configuration.
    ///
    /// # Errors
    /// Returns `ConfigFormat` if the text is not a mapping of field specifications.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let fields = serde_yaml_ng::from_str::<Option<FieldMap>>(source)?.unwrap_or_default();
        tracing::debug!(fields = fields.len(), "Decoded configuration");
        Ok(Self { fields })
    }

    /// Decode a configuration from a YAML file.
    ///
    /// # Errors
    /// Returns `ConfigRead` if the file can't be read, `ConfigFormat` if its
    /// content is malformed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ExtractorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// Top-level field mapping.
    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Get a top-level field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Top-level field names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.names()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Visit every field specification, depth first, with its dotted path.
    pub fn walk(&self, mut visit: impl FnMut(&str, &FieldSpec)) {
        fn walk_map(prefix: &str, map: &FieldMap, visit: &mut dyn FnMut(&str, &FieldSpec)) {
            for (name, spec) in map.iter() {
                let path = if prefix.is_empty() {
                    name.to_string()
                } else {
                    format!("{prefix}.{name}")
                };
                visit(&path, spec);
                if let Some(children) = &spec.children {
                    walk_map(&path, children, visit);
                }
            }
        }
        walk_map("", &self.fields, &mut visit);
    }
}

impl From<FieldMap> for Configuration {
    fn from(fields: FieldMap) -> Self {
        Self::new(fields)
    }
}
