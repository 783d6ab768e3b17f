//! Content -> feed entities
//!
//! Fields are dispatched by (name, namespace) in document order. Unknown
//! fields are ignored. Malformed values in optional fields are dropped;
//! missing or malformed required values are format errors.

use tracing::{debug, trace};
use url::Url;

use super::{CONTENT_NAMESPACE, names};
use crate::config::ReaderConfig;
use crate::content::Content;
use crate::model::{Category, Cloud, Image, Item, Link, LinkRelation, Person, PersonRole};
use crate::value::{FeedValue, parse_date};
use crate::xml::ContentReader;
use crate::{FeedError, Result};

/// Maps RSS 2.0 [`Content`] elements to feed entities
#[derive(Debug, Clone, Default)]
pub struct FeedParser {
    config: ReaderConfig,
}

fn text(content: &Content) -> Option<&str> {
    content.value().filter(|v| !v.is_empty())
}

fn required_url(element: &str, field: &str, raw: &str) -> Result<Url> {
    Url::parse_value(raw).ok_or_else(|| FeedError::invalid(format!("{element} {field}"), raw))
}

impl FeedParser {
    /// Parser with the given settings
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Parse one serialized element (e.g. from `read_outer_subtree`)
    pub fn parse_content(&self, raw: &str) -> Result<Content> {
        let mut reader = ContentReader::fragment(raw.as_bytes(), self.config.clone());
        if !reader.move_next()? {
            return Err(FeedError::InvalidArgument(
                "fragment contains no element".to_string(),
            ));
        }
        reader.read_content()
    }

    /// Map an `<item>` element
    ///
    /// # Examples
    ///
    /// ```
    /// use rss_mapper::FeedParser;
    ///
    /// let parser = FeedParser::default();
    /// let content = parser
    ///     .parse_content("<item><title>Hi</title><guid>http://x/1</guid></item>")
    ///     .unwrap();
    /// let item = parser.parse_item(&content).unwrap();
    /// assert_eq!(item.title.as_deref(), Some("Hi"));
    /// assert_eq!(item.alternate_link().unwrap().uri.as_str(), "http://x/1");
    /// ```
    pub fn parse_item(&self, content: &Content) -> Result<Item> {
        let mut item = Item::new();
        let mut permalink = false;

        for field in content.fields() {
            match (field.namespace(), field.name()) {
                ("", names::TITLE) => {
                    if item.title.is_none() {
                        item.title = field.value().map(str::to_string);
                    }
                }
                ("", names::DESCRIPTION) => {
                    if item.description.is_none() {
                        item.description = field.value().map(str::to_string);
                    }
                }
                ("", names::LINK | names::COMMENTS | names::ENCLOSURE | names::SOURCE) => {
                    item.links.push(self.parse_link(field)?);
                }
                ("", names::AUTHOR) => item.contributors.push(self.parse_person(field)?),
                ("", names::CATEGORY) => item.categories.push(self.parse_category(field)?),
                ("", names::GUID) => {
                    item.id = field.value().map(str::to_string);
                    permalink = field
                        .attribute(names::IS_PERMA_LINK, "")
                        .is_none_or(|v| !v.trim().eq_ignore_ascii_case("false"));
                }
                ("", names::PUB_DATE) => {
                    let raw = field.value().unwrap_or_default();
                    match parse_date(raw) {
                        Ok(date) => item.published = Some(date),
                        Err(e) => debug!("Dropping item pubDate: {}", e),
                    }
                }
                (CONTENT_NAMESPACE, names::ENCODED) => {
                    if item.content.is_none() {
                        item.content = field.value().map(str::to_string);
                    }
                }
                (ns, name) => trace!("Ignoring item field {{{}}}{}", ns, name),
            }
        }

        if permalink && item.alternate_link().is_none() {
            if let Some(uri) = item.id.as_deref().and_then(Url::parse_value) {
                trace!("Using permalink guid {} as alternate link", uri);
                item.links.push(Link::new(uri));
            }
        }
        if self.config.description_as_content && item.content.is_none() {
            item.content = item.description.take();
        }

        Ok(item)
    }

    /// Map a link-shaped element: `link`, `comments`, `enclosure`, `source`
    /// or an extension element of the same shape
    pub fn parse_link(&self, content: &Content) -> Result<Link> {
        let name = content.name();
        let relation = LinkRelation::from_element_name(name);

        match relation {
            LinkRelation::Enclosure => {
                let raw = content
                    .attribute(names::URL, "")
                    .ok_or_else(|| FeedError::missing(name, "url"))?;
                let uri = required_url(name, names::URL, raw)?;
                let length = content
                    .attribute(names::LENGTH, "")
                    .ok_or_else(|| FeedError::missing(name, "length"))?;
                let length = u64::parse_value(length)
                    .ok_or_else(|| FeedError::invalid("enclosure length", length))?;
                let media_type = content
                    .attribute(names::TYPE, "")
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| FeedError::missing(name, "type"))?;
                Ok(Link::enclosure(uri, length, media_type))
            }
            LinkRelation::Comments => {
                let raw = text(content).ok_or_else(|| FeedError::missing(name, "uri"))?;
                Ok(Link::with_relation(required_url(name, "uri", raw)?, relation))
            }
            _ => {
                let mut link = match content.attribute(names::URL, "") {
                    Some(raw) => {
                        let mut link =
                            Link::with_relation(required_url(name, names::URL, raw)?, relation);
                        link.title = text(content).map(str::to_string);
                        link
                    }
                    None => {
                        let raw = text(content).ok_or_else(|| FeedError::missing(name, "uri"))?;
                        Link::with_relation(required_url(name, "uri", raw)?, relation)
                    }
                };

                if let Some(raw) = content.attribute(names::LENGTH, "") {
                    match u64::parse_value(raw) {
                        Some(length) => link.length = length,
                        None => debug!("Dropping <{}> length {:?}", name, raw),
                    }
                }
                link.media_type = content
                    .attribute(names::TYPE, "")
                    .filter(|t| !t.is_empty())
                    .map(str::to_string);
                Ok(link)
            }
        }
    }

    /// Map `author`, `managingEditor` or `webMaster`
    pub fn parse_person(&self, content: &Content) -> Result<Person> {
        let email = text(content).ok_or_else(|| FeedError::missing(content.name(), "email"))?;
        Ok(Person::with_role(
            email,
            PersonRole::from_element_name(content.name()),
        ))
    }

    /// Map `<category>`; an empty name is an error
    pub fn parse_category(&self, content: &Content) -> Result<Category> {
        let name = text(content).ok_or_else(|| FeedError::missing(content.name(), "name"))?;
        Ok(Category {
            name: name.to_string(),
            scheme: content
                .attribute(names::DOMAIN, "")
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        })
    }

    /// Map `<image>`
    ///
    /// Fields may appear in any order. Absent fields stay unset; present
    /// `url` and `link` values must be absolute URIs.
    pub fn parse_image(&self, content: &Content) -> Result<Image> {
        let mut image = Image::default();
        for field in content.fields() {
            match (field.namespace(), field.name()) {
                ("", names::URL) => {
                    if let Some(raw) = text(field) {
                        image.url = Some(required_url("image", names::URL, raw)?);
                    }
                }
                ("", names::LINK) => {
                    if let Some(raw) = text(field) {
                        image.link = Some(required_url("image", names::LINK, raw)?);
                    }
                }
                ("", names::TITLE) => image.title = field.value().map(str::to_string),
                ("", names::DESCRIPTION) => image.description = field.value().map(str::to_string),
                (ns, name) => trace!("Ignoring image field {{{}}}{}", ns, name),
            }
        }
        Ok(image)
    }

    /// Map `<cloud>`; all five attributes are required
    pub fn parse_cloud(&self, content: &Content) -> Result<Cloud> {
        let attr = |field: &'static str| {
            content
                .attribute(field, "")
                .ok_or_else(|| FeedError::missing(content.name(), field))
        };
        let port = attr(names::PORT)?;
        Ok(Cloud {
            domain: attr(names::DOMAIN)?.to_string(),
            port: u16::parse_value(port).ok_or_else(|| FeedError::invalid("cloud port", port))?,
            path: attr(names::PATH)?.to_string(),
            register_procedure: attr(names::REGISTER_PROCEDURE)?.to_string(),
            protocol: attr(names::PROTOCOL)?.to_string(),
        })
    }

    /// Parse the element text as a scalar
    pub fn parse_value<T: FeedValue>(&self, content: &Content) -> Result<T> {
        let raw = content.value().unwrap_or_default();
        T::parse_value(raw).ok_or_else(|| FeedError::invalid(content.name(), raw))
    }
}
