//! Format-neutral content model
//!
//! A [`Content`] is one XML element: its name and namespace, an optional
//! text value, attributes and an ordered list of child elements ("fields").
//! It sits between the wire format and the typed feed entities: the reader
//! produces it, the parser consumes it, the formatter produces it and the
//! writer serializes it.
//!
//! Construction is append-only. Fields keep the order they were added in,
//! which is the order they appear on the wire.

/// Namespace URI reserved for namespace declarations (`xmlns`, `xmlns:p`)
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Namespace URI bound to the reserved `xml` prefix
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A single attribute of a [`Content`] element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    namespace: String,
    prefix: Option<String>,
    value: String,
}

impl Attribute {
    /// Attribute without a namespace
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: String::new(),
            prefix: None,
            value: value.into(),
        }
    }

    /// Namespace-qualified attribute
    pub fn with_namespace(
        name: impl Into<String>,
        namespace: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            prefix: None,
            value: value.into(),
        }
    }

    /// Namespace declaration `xmlns:{prefix}="{uri}"`
    ///
    /// Passed as a root passthrough attribute, it binds the prefix for the
    /// whole document so nested elements reuse it instead of redeclaring.
    ///
    /// ```
    /// use rss_mapper::Attribute;
    ///
    /// let decl = Attribute::namespace_declaration("dc", "http://purl.org/dc/elements/1.1/");
    /// assert!(decl.is_namespace_declaration());
    /// ```
    pub fn namespace_declaration(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: prefix.into(),
            namespace: XMLNS_NAMESPACE.to_string(),
            prefix: Some("xmlns".to_string()),
            value: uri.into(),
        }
    }

    /// Preferred prefix used when the attribute is written
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Local name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI, empty for none
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Prefix seen on the wire or requested for output
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Unescaped value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True for `xmlns` declarations created by [`Attribute::namespace_declaration`]
    pub fn is_namespace_declaration(&self) -> bool {
        self.namespace == XMLNS_NAMESPACE
    }

    pub(crate) fn set_prefix(&mut self, prefix: Option<String>) {
        self.prefix = prefix;
    }
}

/// One XML element and its subtree
///
/// # Example
///
/// ```
/// use rss_mapper::{Attribute, Content};
///
/// let mut guid = Content::with_value("guid", "http://example.com/1");
/// guid.add_attribute(Attribute::new("isPermaLink", "true"));
///
/// let mut item = Content::new("item");
/// item.add_field(Content::with_value("title", "Hello"));
/// item.add_field(guid);
///
/// assert_eq!(item.fields().len(), 2);
/// assert_eq!(item.fields()[1].attribute("isPermaLink", ""), Some("true"));
/// assert_eq!(item.field("title", "").and_then(|f| f.value()), Some("Hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    name: String,
    namespace: String,
    prefix: Option<String>,
    value: Option<String>,
    attributes: Vec<Attribute>,
    fields: Vec<Content>,
}

impl Content {
    /// Empty element without a namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: String::new(),
            prefix: None,
            value: None,
            attributes: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Element carrying a text value
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut content = Self::new(name);
        content.value = Some(value.into());
        content
    }

    /// Set the namespace URI (builder style)
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Preferred prefix used when the element is written (builder style)
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Local name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace URI, empty for none
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Prefix seen on the wire or requested for output
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Direct text value
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Child elements in document order
    pub fn fields(&self) -> &[Content] {
        &self.fields
    }

    /// Whether this element matches `name` in `namespace`
    pub fn is(&self, name: &str, namespace: &str) -> bool {
        self.name == name && self.namespace == namespace
    }

    /// Append a child element
    pub fn add_field(&mut self, field: Content) {
        self.fields.push(field);
    }

    /// Append an attribute
    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Set the text value
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// First attribute value matching `name` in `namespace`
    ///
    /// Absence is not an error; callers treat `None` as "not present".
    pub fn attribute(&self, name: &str, namespace: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.namespace == namespace)
            .map(|a| a.value.as_str())
    }

    /// First child element matching `name` in `namespace`
    pub fn field(&self, name: &str, namespace: &str) -> Option<&Content> {
        self.fields.iter().find(|f| f.is(name, namespace))
    }

    pub(crate) fn set_prefix(&mut self, prefix: Option<String>) {
        self.prefix = prefix;
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        match &mut self.value {
            Some(value) => value.push_str(text),
            None => self.value = Some(text.to_string()),
        }
    }

    /// Drop whitespace-only values and optionally trim the rest
    pub(crate) fn finish_value(&mut self, trim: bool) {
        if let Some(value) = self.value.take() {
            if value.trim().is_empty() {
                return;
            }
            self.value = Some(if trim {
                value.trim().to_string()
            } else {
                value
            });
        }
    }
}
