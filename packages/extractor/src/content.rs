//! Content types: how a value is read out of a single matched element.

use std::fmt;

use scraper::ElementRef;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Rule for reading content from an element.
///
/// Unknown type names decode as [`ContentType::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    /// Value of a named attribute.
    Attribute,
    /// Inner markup, unmodified.
    Html,
    /// The `src` attribute.
    Image,
    /// The `href` attribute.
    Link,
    /// Inner text with markup stripped and whitespace trimmed.
    #[default]
    Text,
}

impl ContentType {
    /// All built-in types.
    pub const ALL: [ContentType; 5] = [
        ContentType::Attribute,
        ContentType::Html,
        ContentType::Image,
        ContentType::Link,
        ContentType::Text,
    ];

    /// Canonical type name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Attribute => "Attribute",
            ContentType::Html => "Html",
            ContentType::Image => "Image",
            ContentType::Link => "Link",
            ContentType::Text => "Text",
        }
    }

    /// Look up a type by its exact name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Look up a type by name, falling back to `Text` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(type_name = %name, "Unknown content type, using Text");
            ContentType::Text
        })
    }

    /// Read content from an element.
    ///
    /// # Arguments
    /// * `element` - The matched element
    /// * `attribute` - Attribute name, only used by `Attribute`
    ///
    /// # Returns
    /// The raw content, or `None` when there is nothing to read (missing
    /// attribute, or `Attribute` without an attribute name).
    #[must_use]
    pub fn extract(&self, element: ElementRef<'_>, attribute: Option<&str>) -> Option<String> {
        match self {
            ContentType::Attribute => {
                let name = attribute.filter(|a| !a.is_empty())?;
                read_attribute(element, name)
            }
            ContentType::Html => Some(element.inner_html()),
            ContentType::Image => read_attribute(element, "src"),
            ContentType::Link => read_attribute(element, "href"),
            ContentType::Text => Some(element.text().collect::<String>().trim().to_string()),
        }
    }
}

fn read_attribute(element: ElementRef<'_>, name: &str) -> Option<String> {
    let value = element.value().attr(name).map(String::from);
    if value.is_none() {
        tracing::debug!(
            attribute = name,
            element = element.value().name(),
            "Attribute missing"
        );
    }
    value
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum TypeName {
            Name(String),
            Missing(()),
            Other(IgnoredAny),
        }

        Ok(match TypeName::deserialize(deserializer)? {
            TypeName::Name(name) => ContentType::from_name(&name),
            TypeName::Missing(()) => ContentType::Text,
            TypeName::Other(_) => {
                tracing::warn!("Content type is not a name, using Text");
                ContentType::Text
            }
        })
    }
}
