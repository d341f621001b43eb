//! Formatter trait definition.

use crate::types::Value;

/// Trait for formatters.
///
/// A formatter is a pure, stateless transform identified by a unique name.
/// It must be total: every input maps to some output, nothing panics.
pub trait Formatter: Send + Sync {
    /// Name used to reference this formatter from a field specification.
    fn name(&self) -> &str;

    /// Transform a value.
    fn format(&self, value: Value) -> Value;
}
