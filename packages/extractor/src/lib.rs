//! DOM Extractor - Extract structured records from HTML with declarative
//! CSS-selector mappings.
//!
//! A mapping names output fields and describes, per field, which elements
//! to select, how to read a value from them, and which formatters to apply.
//! The same mapping is reused against any number of documents.
//!
//! # Example
//!
//! ```
//! use dom_extractor::{Decimal, Extractor, Formatter, Integer, Value};
//!
//! let yaml = r#"
//! width:
//!   selector: img
//!   type: Attribute
//!   attribute: width
//!   format: [Integer, Decimal]
//! items:
//!   selector: "ul.items li"
//!   multiple: true
//! "#;
//!
//! let formatters: Vec<Box<dyn Formatter>> = vec![Box::new(Integer), Box::new(Decimal)];
//! let extractor = Extractor::from_yaml_str(yaml, formatters).unwrap();
//! let record = extractor.extract(
//!     r#"<img src="photo.jpg" width="200"><ul class="items"><li>One</li><li>Two</li></ul>"#,
//! );
//!
//! assert_eq!(record["width"], Value::Float(200.0));
//! assert_eq!(record["items"], Value::from(vec!["One", "Two"]));
//! ```
//!
//! # Architecture
//!
//! - [`types`]: Extracted values and records
//! - [`field`]: Field specifications and ordered field mappings
//! - [`content`]: Content types (how a value is read from an element)
//! - [`registry`]: Formatter registry, chain and built-in formatters
//! - [`resolver`]: Recursive selector resolution
//! - [`engine`]: The extractor tying it all together
//! - [`config`]: Configuration decoding and constants
//! - [`document`]: Document loading from strings, files and transports
//! - [`http`]: HTTP transport
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod content;
pub mod document;
pub mod engine;
pub mod error;
pub mod field;
pub mod http;
pub mod registry;
pub mod resolver;
pub mod types;

pub use config::Configuration;
pub use content::ContentType;
pub use engine::Extractor;
pub use error::{ExtractorError, Result};
pub use field::{FieldMap, FieldSpec, FormatList};
pub use http::{HttpTransport, Transport};
pub use registry::{Decimal, Formatter, FormatterChain, FormatterRegistry, Integer};
pub use types::{Record, Value};
