//! Field specifications: the declarative description of one output field.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::content::ContentType;

/// How to produce one output field from a context.
///
/// When `children` is present the field is composite: each match is resolved
/// into a nested record and `content_type`, `attribute` and `format` are not
/// used for value production.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldSpec {
    /// CSS selector scoped to the current context.
    #[serde(default, alias = "css")]
    pub selector: Option<String>,

    /// Rule for reading content out of a matched element.
    #[serde(default, rename = "type")]
    pub content_type: ContentType,

    /// Attribute name read by [`ContentType::Attribute`].
    #[serde(default)]
    pub attribute: Option<String>,

    /// Formatter names applied in order.
    #[serde(default)]
    pub format: FormatList,

    /// Collect every match instead of the first.
    #[serde(default)]
    pub multiple: bool,

    /// Child fields resolved against each matched element.
    #[serde(default, deserialize_with = "deserialize_children")]
    pub children: Option<FieldMap>,
}

impl FieldSpec {
    /// Create a text field for a selector.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    #[must_use]
    pub fn with_format<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.format = names.into_iter().collect();
        self
    }

    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: FieldMap) -> Self {
        self.children = Some(children);
        self
    }

    /// Whether this field produces nested records.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.children.is_some()
    }
}

/// `children: ~` still marks a composite field, with no child fields.
fn deserialize_children<'de, D>(deserializer: D) -> Result<Option<FieldMap>, D::Error>
where
    D: Deserializer<'de>,
{
    let children = Option::<FieldMap>::deserialize(deserializer)?;
    Ok(Some(children.unwrap_or_default()))
}

/// Ordered list of formatter names.
///
/// Deserializes from a single name or a sequence of names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatList(Vec<String>);

impl FormatList {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for FormatList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'de> Deserialize<'de> for FormatList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
            None => Self::default(),
            Some(OneOrMany::One(name)) => Self(vec![name]),
            Some(OneOrMany::Many(names)) => Self(names),
        })
    }
}

/// Ordered mapping of field name to specification.
///
/// Insertion order is output order. Names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: Vec<(String, FieldSpec)>,
}

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing an existing field of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, spec: FieldSpec) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = spec,
            None => self.fields.push((name, spec)),
        }
    }

    /// Builder form of [`FieldMap::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(name, spec);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldMapVisitor)
    }
}

struct FieldMapVisitor;

impl<'de> Visitor<'de> for FieldMapVisitor {
    type Value = FieldMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping of field names to field specifications")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
        let mut map = FieldMap::new();
        while let Some((name, spec)) = access.next_entry::<String, FieldSpec>()? {
            if map.get(&name).is_some() {
                return Err(de::Error::custom(format!("duplicate field name '{name}'")));
            }
            map.fields.push((name, spec));
        }
        Ok(map)
    }
}
