//! Feed entity definitions
//!
//! Entities are plain values. They are format-agnostic: whether an item is
//! complete enough to be written is checked by the formatter, not here.

use std::fmt;

use chrono::{DateTime, Utc};
use url::Url;

/// Relationship of a [`Link`] to the element carrying it
///
/// Selects the wire shape a link is written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LinkRelation {
    /// Primary link (`<link>`)
    #[default]
    Alternate,
    /// Media attachment (`<enclosure url length type/>`)
    Enclosure,
    /// Comments page (`<comments>`)
    Comments,
    /// Originating feed (`<source url>`)
    Source,
    /// Item guid used as a permalink (`<guid isPermaLink="true">`)
    Guid,
    /// Any other relationship
    Other(String),
}

impl LinkRelation {
    /// Relationship tag
    pub fn as_str(&self) -> &str {
        match self {
            LinkRelation::Alternate => "alternate",
            LinkRelation::Enclosure => "enclosure",
            LinkRelation::Comments => "comments",
            LinkRelation::Source => "source",
            LinkRelation::Guid => "guid",
            LinkRelation::Other(tag) => tag,
        }
    }

    /// Relationship for a link read from element `name`
    ///
    /// A bare `link` element is the alternate link; any other element name
    /// is taken literally.
    pub fn from_element_name(name: &str) -> Self {
        match name {
            "link" | "alternate" => LinkRelation::Alternate,
            "enclosure" => LinkRelation::Enclosure,
            "comments" => LinkRelation::Comments,
            "source" => LinkRelation::Source,
            "guid" => LinkRelation::Guid,
            other => LinkRelation::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link to an external resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target URI
    pub uri: Url,
    /// Relationship tag
    pub relation: LinkRelation,
    /// Human-readable title
    pub title: Option<String>,
    /// Size in bytes, 0 when unknown
    pub length: u64,
    /// MIME type of the target
    pub media_type: Option<String>,
}

impl Link {
    /// Alternate link to `uri`
    pub fn new(uri: Url) -> Self {
        Self::with_relation(uri, LinkRelation::Alternate)
    }

    /// Link with an explicit relationship
    pub fn with_relation(uri: Url, relation: LinkRelation) -> Self {
        Self {
            uri,
            relation,
            title: None,
            length: 0,
            media_type: None,
        }
    }

    /// Enclosure of `length` bytes of `media_type`
    ///
    /// ```
    /// use rss_mapper::{Link, LinkRelation};
    /// use url::Url;
    ///
    /// let uri = Url::parse("http://example.com/episode.mp3").unwrap();
    /// let link = Link::enclosure(uri, 24986239, "audio/mpeg");
    /// assert_eq!(link.relation, LinkRelation::Enclosure);
    /// ```
    pub fn enclosure(uri: Url, length: u64, media_type: impl Into<String>) -> Self {
        Self {
            length,
            media_type: Some(media_type.into()),
            ..Self::with_relation(uri, LinkRelation::Enclosure)
        }
    }

    /// Set the title (builder style)
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Role a [`Person`] plays for a channel or item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PersonRole {
    /// `author`
    #[default]
    Author,
    /// `managingEditor`
    ManagingEditor,
    /// `webMaster`
    WebMaster,
    /// Any other element name
    Other(String),
}

impl PersonRole {
    /// Element name for this role
    pub fn as_str(&self) -> &str {
        match self {
            PersonRole::Author => "author",
            PersonRole::ManagingEditor => "managingEditor",
            PersonRole::WebMaster => "webMaster",
            PersonRole::Other(name) => name,
        }
    }

    /// Role for a person read from element `name`
    pub fn from_element_name(name: &str) -> Self {
        match name {
            "author" => PersonRole::Author,
            "managingEditor" => PersonRole::ManagingEditor,
            "webMaster" => PersonRole::WebMaster,
            other => PersonRole::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person, identified by email address
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    /// Email address (RSS allows a trailing display name, e.g. `jo@x.org (Jo)`)
    pub email: String,
    /// Role, `author` by default
    pub role: PersonRole,
}

impl Person {
    /// Author with `email`
    pub fn new(email: impl Into<String>) -> Self {
        Self::with_role(email, PersonRole::Author)
    }

    /// Person with an explicit role
    pub fn with_role(email: impl Into<String>, role: PersonRole) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}

/// A category label
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Category {
    /// Category name
    pub name: String,
    /// Taxonomy the name belongs to (`domain` attribute)
    pub scheme: Option<String>,
}

impl Category {
    /// Category without a scheme
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scheme: None,
        }
    }

    /// Set the scheme (builder style)
    pub fn in_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }
}

/// Channel image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    /// Image location; required for writing
    pub url: Option<Url>,
    /// Alt text; required for writing
    pub title: Option<String>,
    /// Site the image links to; required for writing
    pub link: Option<Url>,
    /// Link title text
    pub description: Option<String>,
}

impl Image {
    /// Image with all required fields set
    pub fn new(url: Url, title: impl Into<String>, link: Url) -> Self {
        Self {
            url: Some(url),
            title: Some(title.into()),
            link: Some(link),
            description: None,
        }
    }
}

/// Channel `<cloud>` registration endpoint (rssCloud)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cloud {
    pub domain: String,
    pub port: u16,
    pub path: String,
    pub register_procedure: String,
    /// `xml-rpc`, `soap` or `http-post`
    pub protocol: String,
}

/// A feed item
///
/// RSS requires a title or a description; this is checked when the item is
/// written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    /// Unique identifier (`guid`)
    pub id: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Synopsis
    pub description: Option<String>,
    /// Full content (`content:encoded`)
    pub content: Option<String>,
    /// Publication date; written as RFC 822, so only whole seconds survive
    pub published: Option<DateTime<Utc>>,
    /// Links, including enclosures and comments
    pub links: Vec<Link>,
    /// Authors
    pub contributors: Vec<Person>,
    /// Categories
    pub categories: Vec<Category>,
}

impl Item {
    /// Empty item
    pub fn new() -> Self {
        Self::default()
    }

    /// First alternate link
    pub fn alternate_link(&self) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.relation == LinkRelation::Alternate)
    }

    /// Link tagged as the guid permalink, if any
    pub fn guid_link(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.relation == LinkRelation::Guid)
    }

    /// Enclosure links
    pub fn enclosures(&self) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(|l| l.relation == LinkRelation::Enclosure)
    }
}
