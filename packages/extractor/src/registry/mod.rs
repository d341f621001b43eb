//! Formatter registry and chain.
//!
//! Formatters are named value transforms registered once at construction.
//! Field specifications reference them by name; a chain applies them in
//! order, skipping names with no registered formatter.

mod chain;
mod core;
mod formatter;
pub mod formatters;

pub use chain::FormatterChain;
pub use core::FormatterRegistry;
pub use formatter::Formatter;
pub use formatters::{Decimal, Integer};
