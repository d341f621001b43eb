//! Ordered formatter pipeline.

use super::formatter::Formatter;
use crate::types::Value;

/// Formatters applied left to right; each output feeds the next.
pub struct FormatterChain<'r> {
    formatters: Vec<&'r dyn Formatter>,
}

impl<'r> FormatterChain<'r> {
    #[must_use]
    pub fn new(formatters: Vec<&'r dyn Formatter>) -> Self {
        Self { formatters }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Run a value through every formatter in order.
    #[must_use]
    pub fn apply(&self, value: Value) -> Value {
        self.formatters
            .iter()
            .fold(value, |acc, formatter| formatter.format(acc))
    }

    /// Format extracted content.
    ///
    /// `None` (no content) bypasses the chain and yields `Value::Null`.
    #[must_use]
    pub fn apply_content(&self, content: Option<String>) -> Value {
        match content {
            Some(text) => self.apply(Value::String(text)),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Decimal, Integer};

    struct Counting;

    impl Formatter for Counting {
        fn name(&self) -> &str {
            "Counting"
        }

        fn format(&self, value: Value) -> Value {
            match value {
                Value::String(s) => Value::String(format!("{s}!")),
                other => other,
            }
        }
    }

    #[test]
    fn test_empty_chain_passes_through() {
        let chain = FormatterChain::new(Vec::new());
        assert!(chain.is_empty());
        assert_eq!(chain.apply(Value::from("200")), Value::from("200"));
    }

    #[test]
    fn test_chain_order_matters() {
        let int_then_dec = FormatterChain::new(vec![&Integer as &dyn Formatter, &Decimal]);
        let dec_then_int = FormatterChain::new(vec![&Decimal as &dyn Formatter, &Integer]);

        assert_eq!(int_then_dec.apply(Value::from("200")), Value::Float(200.0));
        assert_eq!(dec_then_int.apply(Value::from("200")), Value::Int(200));
        assert_eq!(int_then_dec.apply(Value::from("2.7")), Value::Float(2.0));
        assert_eq!(dec_then_int.apply(Value::from("2.7")), Value::Int(2));
    }

    #[test]
    fn test_same_formatter_repeated() {
        let chain = FormatterChain::new(vec![&Counting as &dyn Formatter, &Counting, &Counting]);
        assert_eq!(chain.apply(Value::from("hey")), Value::from("hey!!!"));
    }

    #[test]
    fn test_no_content_skips_chain() {
        let chain = FormatterChain::new(vec![&Integer as &dyn Formatter]);
        assert_eq!(chain.apply_content(None), Value::Null);
        assert_eq!(chain.apply_content(Some("7".to_string())), Value::Int(7));
    }
}
