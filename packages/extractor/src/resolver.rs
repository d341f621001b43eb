//! Selector resolution: turns one field specification into one value.
//!
//! A field is resolved against a context, either the whole document or a
//! single matched element. Composite fields recurse into their children
//! with each matched element as the new context.

use scraper::{ElementRef, Html, Selector};

use crate::field::{FieldMap, FieldSpec};
use crate::registry::FormatterRegistry;
use crate::types::{Record, Value};

/// Where a selector is evaluated.
#[derive(Clone, Copy)]
pub enum Context<'a> {
    /// The whole document.
    Document(&'a Html),
    /// Descendants of one element.
    Element(ElementRef<'a>),
}

impl<'a> Context<'a> {
    /// Matched elements in document order, evaluated lazily.
    pub fn select<'s>(
        &self,
        selector: &'s Selector,
    ) -> Box<dyn Iterator<Item = ElementRef<'a>> + 's>
    where
        'a: 's,
    {
        match *self {
            Context::Document(html) => Box::new(html.select(selector)),
            Context::Element(element) => Box::new(element.select(selector)),
        }
    }
}

impl<'a> From<&'a Html> for Context<'a> {
    fn from(html: &'a Html) -> Self {
        Context::Document(html)
    }
}

impl<'a> From<ElementRef<'a>> for Context<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Context::Element(element)
    }
}

/// Resolves field specifications using a formatter registry.
///
/// Holds no state between calls; every resolution re-evaluates its selectors.
pub struct Resolver<'r> {
    formatters: &'r FormatterRegistry,
}

impl<'r> Resolver<'r> {
    #[must_use]
    pub fn new(formatters: &'r FormatterRegistry) -> Self {
        Self { formatters }
    }

    /// Resolve every field of a mapping against one context.
    #[must_use]
    pub fn resolve_fields(&self, fields: &FieldMap, context: Context<'_>) -> Record {
        fields
            .iter()
            .map(|(name, spec)| (name, self.resolve(spec, context)))
            .collect()
    }

    /// Resolve one field specification against a context.
    ///
    /// # Returns
    /// * `multiple` fields: an array with one entry per match (possibly empty)
    /// * single fields: the value of the first match, or `Value::Null` when
    ///   nothing matched
    #[must_use]
    pub fn resolve(&self, spec: &FieldSpec, context: Context<'_>) -> Value {
        let selector = parse_selector(spec);
        let mut matches = selector
            .iter()
            .flat_map(|selector| context.select(selector));

        if spec.multiple {
            let values = matches
                .map(|element| self.resolve_element(spec, element))
                .collect();
            return Value::Array(values);
        }

        matches
            .next()
            .map_or(Value::Null, |element| self.resolve_element(spec, element))
    }

    /// Produce the value for a single matched element.
    fn resolve_element(&self, spec: &FieldSpec, element: ElementRef<'_>) -> Value {
        if let Some(children) = &spec.children {
            return Value::Record(self.resolve_fields(children, Context::Element(element)));
        }

        let content = spec
            .content_type
            .extract(element, spec.attribute.as_deref());
        self.formatters.chain(&spec.format).apply_content(content)
    }
}

/// Parse the field's selector. A missing or malformed selector matches nothing.
fn parse_selector(spec: &FieldSpec) -> Option<Selector> {
    let Some(selector) = spec.selector.as_deref() else {
        tracing::debug!("Field has no selector, nothing matched");
        return None;
    };

    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::debug!(selector, error = %err, "Malformed selector, nothing matched");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentType;
    use pretty_assertions::assert_eq;

    fn resolve(spec: &FieldSpec, html: &str) -> Value {
        let registry = FormatterRegistry::with_builtins();
        let document = Html::parse_document(html);
        Resolver::new(&registry).resolve(spec, Context::Document(&document))
    }

    #[test]
    fn test_context_select_yields_matches_in_order() {
        let document = Html::parse_document("<ul><li>One</li><li>Two</li><li>Three</li></ul>");
        let selector = Selector::parse("li").unwrap();

        let mut matches = Context::Document(&document).select(&selector);
        let first = matches.next().unwrap();
        assert_eq!(first.text().collect::<String>(), "One");
        assert_eq!(matches.count(), 2);

        let list = document.select(&Selector::parse("ul").unwrap()).next().unwrap();
        assert_eq!(Context::Element(list).select(&selector).count(), 3);
    }

    #[test]
    fn test_first_match_only() {
        let spec = FieldSpec::new("li");
        assert_eq!(
            resolve(&spec, "<ul><li>One</li><li>Two</li></ul>"),
            Value::from("One")
        );
        assert_eq!(
            resolve(&spec, "<ul><li>One</li><li>Changed</li><li>Added</li></ul>"),
            Value::from("One")
        );
    }

    #[test]
    fn test_multiple_collects_in_document_order() {
        let spec = FieldSpec::new("ul.items li").multiple();
        assert_eq!(
            resolve(&spec, r#"<ul class="items"><li>One</li><li>Two</li></ul>"#),
            Value::from(vec!["One", "Two"])
        );
    }

    #[test]
    fn test_no_match() {
        let single = FieldSpec::new("table");
        let multiple = FieldSpec::new("table").multiple();

        assert_eq!(resolve(&single, "<p>x</p>"), Value::Null);
        assert_eq!(resolve(&multiple, "<p>x</p>"), Value::Array(Vec::new()));
    }

    #[test]
    fn test_missing_selector() {
        let spec = FieldSpec::default();
        assert_eq!(resolve(&spec, "<div>content</div>"), Value::Null);
        assert_eq!(
            resolve(&spec.multiple(), "<div>content</div>"),
            Value::Array(Vec::new())
        );
    }

    #[test]
    fn test_malformed_selector() {
        let spec = FieldSpec::new("div[[");
        assert_eq!(resolve(&spec, "<div>content</div>"), Value::Null);
        assert_eq!(
            resolve(&spec.multiple(), "<div>content</div>"),
            Value::Array(Vec::new())
        );
    }

    #[test]
    fn test_children_record() {
        let spec = FieldSpec::new("div").with_children(
            FieldMap::new()
                .with("name", FieldSpec::new("p"))
                .with("value", FieldSpec::new("span")),
        );

        let value = resolve(&spec, "<div><p>key</p><span>value</span></div>");
        let record = value.as_record().unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "value"]);
        assert_eq!(record["name"], Value::from("key"));
        assert_eq!(record["value"], Value::from("value"));
    }

    #[test]
    fn test_children_ignore_type_and_format() {
        let spec = FieldSpec::new("div")
            .with_type(ContentType::Html)
            .with_format(["Integer"])
            .with_children(FieldMap::new().with("name", FieldSpec::new("p")));

        let value = resolve(&spec, "<div><p>42</p></div>");
        let record = value.as_record().unwrap();
        assert_eq!(record["name"], Value::from("42"));
    }

    #[test]
    fn test_empty_children_yield_empty_records() {
        let spec = FieldSpec::new("li").multiple().with_children(FieldMap::new());

        assert_eq!(
            resolve(&spec, "<ul><li>a</li><li>b</li></ul>"),
            Value::Array(vec![Value::Record(Record::new()), Value::Record(Record::new())])
        );
    }

    #[test]
    fn test_children_without_match() {
        let children = FieldMap::new().with("name", FieldSpec::new("p"));
        let single = FieldSpec::new("section").with_children(children.clone());
        let multiple = FieldSpec::new("section").multiple().with_children(children);

        assert_eq!(resolve(&single, "<div></div>"), Value::Null);
        assert_eq!(resolve(&multiple, "<div></div>"), Value::Array(Vec::new()));
    }

    #[test]
    fn test_children_scoped_to_each_match() {
        let spec = FieldSpec::new("ul li").multiple().with_children(
            FieldMap::new()
                .with("first", FieldSpec::new(".key"))
                .with("last", FieldSpec::new(".value"))
                .with("missing", FieldSpec::new(".none")),
        );
        let html = r#"
            <ul>
                <li><p class="key">John</p><p class="value">Doe</p></li>
                <li><p class="key">Jane</p></li>
            </ul>"#;

        let value = resolve(&spec, html);
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);

        let john = items[0].as_record().unwrap();
        assert_eq!(john["first"], Value::from("John"));
        assert_eq!(john["last"], Value::from("Doe"));
        assert_eq!(john["missing"], Value::Null);

        let jane = items[1].as_record().unwrap();
        assert_eq!(jane["first"], Value::from("Jane"));
        assert_eq!(jane["last"], Value::Null);
    }

    #[test]
    fn test_deeply_nested_children() {
        let spec = FieldSpec::new("section").with_children(FieldMap::new().with(
            "rows",
            FieldSpec::new("tr").multiple().with_children(
                FieldMap::new().with("cells", FieldSpec::new("td").multiple()),
            ),
        ));
        let html = "<section><table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table></section>";

        let value = resolve(&spec, html);
        let rows = value.as_record().unwrap()["rows"].as_array().unwrap().clone();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].as_record().unwrap()["cells"],
            Value::from(vec!["a", "b"])
        );
        assert_eq!(rows[1].as_record().unwrap()["cells"], Value::from(vec!["c"]));
    }

    #[test]
    fn test_format_applies_per_match() {
        let spec = FieldSpec::new("td").multiple().with_format(["Integer"]);
        assert_eq!(
            resolve(&spec, "<table><tr><td>1</td><td>2px</td><td>x</td></tr></table>"),
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(0)])
        );
    }

    #[test]
    fn test_missing_attribute_skips_formatters() {
        let spec = FieldSpec::new("img")
            .with_type(ContentType::Attribute)
            .with_attribute("alt")
            .with_format(["Integer"]);
        assert_eq!(resolve(&spec, r#"<img src="a.png">"#), Value::Null);
    }

    #[test]
    fn test_element_context_excludes_itself() {
        let registry = FormatterRegistry::new();
        let document = Html::parse_fragment("<div class=\"outer\"><div>inner</div></div>");
        let outer = Selector::parse("div.outer").unwrap();
        let element = document.select(&outer).next().unwrap();

        let value = Resolver::new(&registry).resolve(&FieldSpec::new("div"), element.into());
        assert_eq!(value, Value::from("inner"));
    }
}
