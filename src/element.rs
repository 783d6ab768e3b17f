//! Element classification and format profiles

use std::fmt;

/// Kind of top-level feed element at the cursor
///
/// Classification is by exact, case-sensitive local name; anything a
/// profile does not recognize is [`ElementType::Content`], so extension
/// elements surface as opaque content instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Feed item
    Item,
    /// Link (alternate, comments, enclosure, source, ...)
    Link,
    /// Category
    Category,
    /// Person (author, managing editor, web master)
    Person,
    /// Image
    Image,
    /// Any other element
    Content,
}

impl ElementType {
    /// Lowercase name used in messages
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Item => "item",
            ElementType::Link => "link",
            ElementType::Category => "category",
            ElementType::Person => "person",
            ElementType::Image => "image",
            ElementType::Content => "content",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural constants of a feed format
///
/// Owned by the reader/writer that uses it and passed by reference; there
/// is no process-wide registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedProfile {
    /// Root element name (`rss`)
    pub root: &'static str,
    /// Name of the version attribute on the root (`version`)
    pub version_attribute: &'static str,
    /// Required version (`2.0`)
    pub version: &'static str,
    /// Element holding the feed's entries (`channel`)
    pub container: &'static str,
    /// Local name to element type table
    pub element_types: &'static [(&'static str, ElementType)],
}

impl FeedProfile {
    /// Classify an element by local name
    pub fn element_type(&self, name: &str) -> ElementType {
        self.element_types
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, t)| *t)
            .unwrap_or(ElementType::Content)
    }

    /// Classify an element by local name and namespace
    ///
    /// Only elements in the format's own (empty) namespace are looked up;
    /// extension elements such as `atom:link` are always content.
    pub fn classify(&self, name: &str, namespace: &str) -> ElementType {
        if namespace.is_empty() {
            self.element_type(name)
        } else {
            ElementType::Content
        }
    }
}
