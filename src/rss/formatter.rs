//! Feed entities -> Content
//!
//! Items are emitted in canonical RSS order. Required fields are checked
//! here, at write time; entities themselves accept any combination.

use url::Url;

use super::{CONTENT_NAMESPACE, CONTENT_PREFIX, names};
use crate::content::{Attribute, Content};
use crate::model::{Category, Cloud, Image, Item, Link, LinkRelation, Person};
use crate::value::FeedValue;
use crate::xml::content_to_string;
use crate::{FeedError, Result};

/// Maps feed entities to RSS 2.0 [`Content`] elements
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedFormatter;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// An id naming the item's alternate link is a permalink
fn is_alternate_uri(item: &Item, id: &str) -> bool {
    match (item.alternate_link(), Url::parse_value(id)) {
        (Some(link), Some(uri)) => link.uri == uri,
        _ => false,
    }
}

impl FeedFormatter {
    /// Formatter for RSS 2.0
    pub fn new() -> Self {
        Self
    }

    /// Serialize one element as a standalone fragment
    pub fn format(&self, content: &Content) -> Result<String> {
        content_to_string(content)
    }

    /// Build an `<item>` element
    ///
    /// Fields are written in the order title, links, description, content,
    /// authors, categories, guid, pubDate. A `guid`-tagged link is not
    /// written as a link; it marks the guid as a permalink instead. Without
    /// a description, the item's content is written as the description.
    ///
    /// # Errors
    ///
    /// [`FeedError::MissingField`] if the item has neither a title nor a
    /// description (or, without a title, content standing in for one), and
    /// any error from
    /// the nested links, people and categories.
    ///
    /// # Examples
    ///
    /// ```
    /// use rss_mapper::{FeedFormatter, ItemBuilder};
    ///
    /// let item = ItemBuilder::new().title("Hello").description("World").build().unwrap();
    /// let formatter = FeedFormatter::new();
    /// let xml = formatter.format(&formatter.create_item_content(&item).unwrap()).unwrap();
    /// assert_eq!(xml, "<item><title>Hello</title><description>World</description></item>");
    /// ```
    pub fn create_item_content(&self, item: &Item) -> Result<Content> {
        let title = non_empty(item.title.as_deref());
        let content = non_empty(item.content.as_deref());
        // content only stands in for a missing description on untitled items
        let description = non_empty(item.description.as_deref())
            .or_else(|| content.filter(|_| title.is_none()));
        if title.is_none() && description.is_none() {
            return Err(FeedError::missing(names::ITEM, "title or description"));
        }

        let mut element = Content::new(names::ITEM);
        if let Some(title) = title {
            element.add_field(Content::with_value(names::TITLE, title));
        }

        let mut permalink = None;
        for link in &item.links {
            if link.relation == LinkRelation::Guid {
                permalink.get_or_insert(link);
                continue;
            }
            element.add_field(self.create_link_content(link)?);
        }

        if let Some(description) = description {
            element.add_field(Content::with_value(names::DESCRIPTION, description));
        }
        if let Some(content) = content.filter(|c| Some(*c) != description) {
            element.add_field(
                Content::with_value(names::ENCODED, content)
                    .in_namespace(CONTENT_NAMESPACE)
                    .with_prefix(CONTENT_PREFIX),
            );
        }

        for person in &item.contributors {
            element.add_field(self.create_person_content(person)?);
        }
        for category in &item.categories {
            element.add_field(self.create_category_content(category)?);
        }

        let id = non_empty(item.id.as_deref());
        match (id, permalink) {
            (Some(id), Some(_)) => element.add_field(guid(id, true)),
            (None, Some(link)) => element.add_field(guid(link.uri.as_str(), true)),
            (Some(id), None) => element.add_field(guid(id, is_alternate_uri(item, id))),
            (None, None) => {}
        }

        if let Some(published) = &item.published {
            element.add_field(self.create_value_content(names::PUB_DATE, published));
        }
        Ok(element)
    }

    /// Build the element for a link
    ///
    /// The relationship selects the shape:
    /// - enclosure: `<enclosure url length type/>`, length and type required
    /// - comments: `<comments>uri</comments>`
    /// - source: `<source>uri</source>`, or `<source url="uri">title</source>`
    ///   when the title differs from the uri
    /// - guid: `<guid isPermaLink="true">uri</guid>`
    /// - anything else: `<link>uri</link>`, or `<link url="uri">title</link>`
    ///   with a title; `length` and `type` when set
    pub fn create_link_content(&self, link: &Link) -> Result<Content> {
        let uri = link.uri.as_str();
        let title = non_empty(link.title.as_deref());

        let element = match &link.relation {
            LinkRelation::Enclosure => {
                if link.length == 0 {
                    return Err(FeedError::invalid("enclosure length", "0"));
                }
                let media_type = non_empty(link.media_type.as_deref())
                    .ok_or_else(|| FeedError::missing(names::ENCLOSURE, "type"))?;
                let mut element = Content::new(names::ENCLOSURE);
                element.add_attribute(Attribute::new(names::URL, uri));
                element.add_attribute(Attribute::new(names::LENGTH, link.length.format_value()));
                element.add_attribute(Attribute::new(names::TYPE, media_type));
                element
            }
            LinkRelation::Comments => Content::with_value(names::COMMENTS, uri),
            LinkRelation::Source => match title.filter(|t| *t != uri) {
                Some(title) => {
                    let mut element = Content::with_value(names::SOURCE, title);
                    element.add_attribute(Attribute::new(names::URL, uri));
                    element
                }
                None => Content::with_value(names::SOURCE, uri),
            },
            LinkRelation::Guid => guid(uri, true),
            LinkRelation::Alternate | LinkRelation::Other(_) => {
                let mut element = match title {
                    Some(title) => {
                        let mut element = Content::with_value(names::LINK, title);
                        element.add_attribute(Attribute::new(names::URL, uri));
                        element
                    }
                    None => Content::with_value(names::LINK, uri),
                };
                if link.length != 0 {
                    element.add_attribute(Attribute::new(names::LENGTH, link.length.format_value()));
                }
                if let Some(media_type) = non_empty(link.media_type.as_deref()) {
                    element.add_attribute(Attribute::new(names::TYPE, media_type));
                }
                element
            }
        };
        Ok(element)
    }

    /// Build `<author>` (or the element named by the person's role)
    pub fn create_person_content(&self, person: &Person) -> Result<Content> {
        let name = person.role.as_str();
        if person.email.is_empty() {
            return Err(FeedError::missing(name, "email"));
        }
        Ok(Content::with_value(name, person.email.as_str()))
    }

    /// Build `<category>`, with `domain` when the category has a scheme
    pub fn create_category_content(&self, category: &Category) -> Result<Content> {
        if category.name.is_empty() {
            return Err(FeedError::missing(names::CATEGORY, "name"));
        }
        let mut element = Content::with_value(names::CATEGORY, category.name.as_str());
        if let Some(scheme) = non_empty(category.scheme.as_deref()) {
            element.add_attribute(Attribute::new(names::DOMAIN, scheme));
        }
        Ok(element)
    }

    /// Build `<image>`; url, title and link are required
    pub fn create_image_content(&self, image: &Image) -> Result<Content> {
        let url = image
            .url
            .as_ref()
            .ok_or_else(|| FeedError::missing(names::IMAGE, "url"))?;
        let title = non_empty(image.title.as_deref())
            .ok_or_else(|| FeedError::missing(names::IMAGE, "title"))?;
        let link = image
            .link
            .as_ref()
            .ok_or_else(|| FeedError::missing(names::IMAGE, "link"))?;

        let mut element = Content::new(names::IMAGE);
        element.add_field(Content::with_value(names::URL, url.as_str()));
        element.add_field(Content::with_value(names::TITLE, title));
        element.add_field(Content::with_value(names::LINK, link.as_str()));
        if let Some(description) = non_empty(image.description.as_deref()) {
            element.add_field(Content::with_value(names::DESCRIPTION, description));
        }
        Ok(element)
    }

    /// Build `<cloud/>`
    pub fn create_cloud_content(&self, cloud: &Cloud) -> Content {
        let mut element = Content::new(names::CLOUD);
        element.add_attribute(Attribute::new(names::DOMAIN, cloud.domain.as_str()));
        element.add_attribute(Attribute::new(names::PORT, cloud.port.format_value()));
        element.add_attribute(Attribute::new(names::PATH, cloud.path.as_str()));
        element.add_attribute(Attribute::new(
            names::REGISTER_PROCEDURE,
            cloud.register_procedure.as_str(),
        ));
        element.add_attribute(Attribute::new(names::PROTOCOL, cloud.protocol.as_str()));
        element
    }

    /// Build a simple text element holding `value`
    pub fn create_value_content<T: FeedValue>(&self, name: &str, value: &T) -> Content {
        Content::with_value(name, value.format_value())
    }
}

fn guid(text: &str, permalink: bool) -> Content {
    let mut element = Content::with_value(names::GUID, text);
    element.add_attribute(Attribute::new(
        names::IS_PERMA_LINK,
        permalink.format_value(),
    ));
    element
}
