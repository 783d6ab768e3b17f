//! Item builder
//!
//! This module provides the ItemBuilder for assembling items that are ready
//! to be written.

use chrono::{DateTime, SubsecRound, Utc};
use url::Url;

use super::types::{Category, Item, Link, LinkRelation, Person};
use crate::{FeedError, Result};

#[must_use]
#[derive(Debug, Clone, Default)]
pub struct ItemBuilder {
    id: Option<String>,
    permalink: bool,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    published: Option<DateTime<Utc>>,
    links: Vec<Link>,
    contributors: Vec<Person>,
    categories: Vec<Category>,
}

impl ItemBuilder {
    /// Create a new ItemBuilder with no fields set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the full content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the guid (written with `isPermaLink="false"`)
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self.permalink = false;
        self
    }

    /// Use `uri` as the guid and mark it as a permalink
    pub fn permalink(mut self, uri: Url) -> Self {
        self.id = Some(uri.to_string());
        self.permalink = true;
        self
    }

    /// Set the publication date, truncated to whole seconds as RFC 822
    /// dates carry no fractions
    pub fn published(mut self, published: DateTime<Utc>) -> Self {
        self.published = Some(published.trunc_subsecs(0));
        self
    }

    /// Add the alternate link
    pub fn link(self, uri: Url) -> Self {
        self.add_link(Link::new(uri))
    }

    /// Add an enclosure
    pub fn enclosure(self, uri: Url, length: u64, media_type: impl Into<String>) -> Self {
        self.add_link(Link::enclosure(uri, length, media_type))
    }

    /// Add a comments link
    pub fn comments(self, uri: Url) -> Self {
        self.add_link(Link::with_relation(uri, LinkRelation::Comments))
    }

    /// Add any link
    pub fn add_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Add an author by email
    pub fn author(mut self, email: impl Into<String>) -> Self {
        self.contributors.push(Person::new(email));
        self
    }

    /// Add a category
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Build the item
    ///
    /// Returns an error if neither a title nor a description was set.
    pub fn build(self) -> Result<Item> {
        let has_text = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        if !has_text(&self.title) && !has_text(&self.description) {
            return Err(FeedError::missing("item", "title or description"));
        }

        let mut links = self.links;
        if self.permalink {
            if let Some(uri) = self.id.as_deref().and_then(|id| Url::parse(id).ok()) {
                links.push(Link::with_relation(uri, LinkRelation::Guid));
            }
        }

        Ok(Item {
            id: self.id,
            title: self.title,
            description: self.description,
            content: self.content,
            published: self.published,
            links,
            contributors: self.contributors,
            categories: self.categories,
        })
    }
}
