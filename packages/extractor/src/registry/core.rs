//! Formatter registry for mapping names to formatters.

use std::collections::{HashMap, HashSet};

use super::chain::FormatterChain;
use super::formatter::Formatter;
use super::formatters::{Decimal, Integer};
use crate::error::{ExtractorError, Result};
use crate::field::FormatList;

/// Registry mapping formatter names to formatters.
///
/// Read-only once the extractor is built, so it can be shared across
/// concurrent extractions.
pub struct FormatterRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatterRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Create a registry with the built-in `Integer` and `Decimal` formatters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert(Box::new(Integer));
        registry.insert(Box::new(Decimal));
        registry
    }

    /// Create a registry from a list of formatters.
    ///
    /// # Errors
    /// Returns `InvalidFormatter` for the first formatter with an invalid name.
    pub fn from_formatters(
        formatters: impl IntoIterator<Item = Box<dyn Formatter>>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for formatter in formatters {
            registry.register_boxed(formatter)?;
        }
        Ok(registry)
    }

    /// Register a formatter under its own name.
    ///
    /// A formatter registered under an existing name replaces the earlier one.
    ///
    /// # Errors
    /// Returns `InvalidFormatter` if the name is empty or contains whitespace.
    pub fn register(&mut self, formatter: impl Formatter + 'static) -> Result<()> {
        self.register_boxed(Box::new(formatter))
    }

    /// Register an already boxed formatter.
    ///
    /// # Errors
    /// Returns `InvalidFormatter` if the name is empty or contains whitespace.
    pub fn register_boxed(&mut self, formatter: Box<dyn Formatter>) -> Result<()> {
        validate_name(formatter.name())?;
        self.insert(formatter);
        Ok(())
    }

    fn insert(&mut self, formatter: Box<dyn Formatter>) {
        let name = formatter.name().to_string();
        if self.formatters.insert(name.clone(), formatter).is_some() {
            tracing::debug!(formatter = %name, "Replaced previously registered formatter");
        }
    }

    /// Get a formatter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Check if a formatter is registered under a name.
    #[must_use]
    pub fn has_formatter(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Return set of all registered names.
    #[must_use]
    pub fn names(&self) -> HashSet<&str> {
        self.formatters.keys().map(|s| s.as_str()).collect()
    }

    /// Iterate over registered formatters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Formatter)> {
        self.formatters
            .iter()
            .map(|(name, f)| (name.as_str(), f.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Build the chain for a list of formatter names.
    ///
    /// Names with no registered formatter are left out.
    #[must_use]
    pub fn chain(&self, names: &FormatList) -> FormatterChain<'_> {
        let formatters = names
            .iter()
            .filter_map(|name| {
                let formatter = self.get(name);
                if formatter.is_none() {
                    tracing::debug!(formatter = %name, "Formatter not registered, skipping");
                }
                formatter
            })
            .collect();
        FormatterChain::new(formatters)
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FormatterRegistry")
            .field("formatters", &names)
            .finish()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ExtractorError::InvalidFormatter(name.to_string()));
    }
    Ok(())
}
