//! Whole-document channel model
//!
//! [`Channel`] gathers every element of an RSS 2.0 channel into one value.
//! It is built on the streaming sessions, so it holds the complete feed in
//! memory; use [`FeedReader`] directly to process large feeds item by item.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc, Weekday};
use tracing::debug;
use url::Url;

use super::names;
use crate::config::WriterConfig;
use crate::content::Content;
use crate::element::ElementType;
use crate::model::{Category, Cloud, Image, Item, Person};
use crate::session::{FeedReader, FeedWriter, day_name};
use crate::value::{FeedValue, parse_date};
use crate::{FeedError, Result};

/// An RSS 2.0 channel and its items
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Channel {
    /// Channel name (`title`)
    pub title: Option<String>,
    /// Website the channel belongs to (`link`)
    pub link: Option<Url>,
    /// Phrase describing the channel (`description`)
    pub description: Option<String>,
    /// Language code such as `en-us`
    pub language: Option<String>,
    /// Copyright notice
    pub copyright: Option<String>,
    /// `managingEditor` and `webMaster`
    pub people: Vec<Person>,
    /// Publication date of the content (`pubDate`)
    pub pub_date: Option<DateTime<Utc>>,
    /// Last time the content changed (`lastBuildDate`)
    pub last_build_date: Option<DateTime<Utc>>,
    /// Channel categories
    pub categories: Vec<Category>,
    /// Program that generated the channel
    pub generator: Option<String>,
    /// Documentation for the feed format (`docs`)
    pub docs: Option<Url>,
    /// Update notification endpoint
    pub cloud: Option<Cloud>,
    /// Minutes the channel may be cached
    pub ttl: Option<u32>,
    /// Channel logo
    pub image: Option<Image>,
    /// Hours (0-23, GMT) aggregators may skip
    pub skip_hours: Vec<u8>,
    /// Days aggregators may skip
    pub skip_days: Vec<Weekday>,
    /// Items in document order
    pub items: Vec<Item>,
    /// Elements with no dedicated field, in document order
    pub extensions: Vec<Content>,
}

fn optional<T: FeedValue>(content: &Content) -> Option<T> {
    let raw = content.value()?;
    let value = T::parse_value(raw);
    if value.is_none() {
        debug!("Dropping <{}> value {:?}", content.name(), raw);
    }
    value
}

fn optional_date(content: &Content) -> Option<DateTime<Utc>> {
    let raw = content.value()?;
    parse_date(raw)
        .inspect_err(|e| debug!("Dropping <{}>: {}", content.name(), e))
        .ok()
}

impl Channel {
    /// Check the elements RSS 2.0 requires of every channel
    pub fn validate(&self) -> Result<()> {
        if self.title.as_deref().is_none_or(str::is_empty) {
            return Err(FeedError::missing(names::CHANNEL, "title"));
        }
        if self.link.is_none() {
            return Err(FeedError::missing(names::CHANNEL, "link"));
        }
        if self.description.is_none() {
            return Err(FeedError::missing(names::CHANNEL, "description"));
        }
        Ok(())
    }

    /// Read a whole channel from a session
    pub fn read_from<R: BufRead>(reader: &mut FeedReader<R>) -> Result<Self> {
        let mut channel = Channel::default();
        reader.read()?;

        while let Some(element_type) = reader.element_type() {
            match element_type {
                ElementType::Item => channel.items.push(reader.read_item()?),
                ElementType::Link => {
                    let link = reader.read_link()?;
                    channel.link.get_or_insert(link.uri);
                }
                ElementType::Category => channel.categories.push(reader.read_category()?),
                ElementType::Person => channel.people.push(reader.read_person()?),
                ElementType::Image => channel.image = Some(reader.read_image()?),
                ElementType::Content => {
                    let content = reader.read_content()?;
                    channel.apply(content, reader)?;
                }
            }
        }

        debug!("Read channel with {} items", channel.items.len());
        Ok(channel)
    }

    fn apply<R>(&mut self, content: Content, reader: &FeedReader<R>) -> Result<()> {
        if !content.namespace().is_empty() {
            self.extensions.push(content);
            return Ok(());
        }
        match content.name() {
            names::TITLE => self.title = content.value().map(str::to_string),
            names::DESCRIPTION => self.description = content.value().map(str::to_string),
            names::LANGUAGE => self.language = content.value().map(str::to_string),
            names::COPYRIGHT => self.copyright = content.value().map(str::to_string),
            names::GENERATOR => self.generator = content.value().map(str::to_string),
            names::DOCS => self.docs = optional(&content),
            names::TTL => self.ttl = optional(&content),
            names::PUB_DATE => self.pub_date = optional_date(&content),
            names::LAST_BUILD_DATE => self.last_build_date = optional_date(&content),
            names::CLOUD => self.cloud = Some(reader.parser().parse_cloud(&content)?),
            names::SKIP_HOURS => {
                self.skip_hours = content
                    .fields()
                    .iter()
                    .filter(|f| f.is(names::HOUR, ""))
                    .filter_map(optional::<u8>)
                    .filter(|h| *h < 24)
                    .collect();
            }
            names::SKIP_DAYS => {
                self.skip_days = content
                    .fields()
                    .iter()
                    .filter(|f| f.is(names::DAY, ""))
                    .filter_map(|f| f.value()?.parse::<Weekday>().ok())
                    .collect();
            }
            _ => self.extensions.push(content),
        }
        Ok(())
    }

    /// Write the channel to a session, metadata first, then items
    pub fn write_to<W: Write>(&self, writer: &mut FeedWriter<W>) -> Result<()> {
        if let Some(title) = &self.title {
            writer.write_title(title)?;
        }
        if let Some(link) = &self.link {
            writer.write_value(names::LINK, link)?;
        }
        if let Some(description) = &self.description {
            writer.write_description(description)?;
        }
        if let Some(language) = &self.language {
            writer.write_language(language)?;
        }
        if let Some(copyright) = &self.copyright {
            writer.write_copyright(copyright)?;
        }
        for person in &self.people {
            writer.write_person(person)?;
        }
        if let Some(date) = &self.pub_date {
            writer.write_pub_date(date)?;
        }
        if let Some(date) = &self.last_build_date {
            writer.write_last_build_date(date)?;
        }
        for category in &self.categories {
            writer.write_category(category)?;
        }
        if let Some(generator) = &self.generator {
            writer.write_generator(generator)?;
        }
        if let Some(docs) = &self.docs {
            writer.write_docs(docs)?;
        }
        if let Some(cloud) = &self.cloud {
            writer.write_cloud(cloud)?;
        }
        if let Some(ttl) = self.ttl {
            writer.write_ttl(ttl)?;
        }
        if let Some(image) = &self.image {
            writer.write_image(image)?;
        }
        if !self.skip_hours.is_empty() {
            writer.write_skip_hours(&self.skip_hours)?;
        }
        if !self.skip_days.is_empty() {
            writer.write_skip_days(&self.skip_days)?;
        }
        for extension in &self.extensions {
            writer.write_content(extension)?;
        }
        for item in &self.items {
            writer.write_item(item)?;
        }
        Ok(())
    }

    /// Serialize as an indented RSS 2.0 document
    ///
    /// # Example
    /// ```
    /// use rss_mapper::{Channel, ItemBuilder, parse_rss};
    /// use url::Url;
    ///
    /// let channel = Channel {
    ///     title: Some("Example".to_string()),
    ///     link: Some(Url::parse("http://example.com/").unwrap()),
    ///     description: Some("An example feed".to_string()),
    ///     items: vec![ItemBuilder::new().title("First post").build().unwrap()],
    ///     ..Default::default()
    /// };
    ///
    /// let xml = channel.to_xml().unwrap();
    /// assert!(xml.starts_with("<?xml"));
    /// assert_eq!(parse_rss(&xml).unwrap(), channel);
    /// ```
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = FeedWriter::with_config(Vec::new(), Vec::new(), WriterConfig::pretty());
        self.write_to(&mut writer)?;
        Ok(String::from_utf8(writer.finish()?)?)
    }
}

/// Parse an RSS 2.0 document into a [`Channel`]
///
/// # Example
/// ```
/// use rss_mapper::parse_rss;
///
/// let xml = r#"<?xml version="1.0"?>
/// <rss version="2.0">
///   <channel>
///     <title>Liftoff News</title>
///     <link>http://liftoff.msfc.nasa.gov/</link>
///     <description>Liftoff to Space Exploration.</description>
///     <ttl>60</ttl>
///     <item>
///       <title>Star City</title>
///       <link>http://liftoff.msfc.nasa.gov/news/2003/news-starcity.asp</link>
///       <guid>http://liftoff.msfc.nasa.gov/2003/06/03.html#item573</guid>
///     </item>
///   </channel>
/// </rss>"#;
///
/// let channel = parse_rss(xml).unwrap();
/// assert_eq!(channel.title.as_deref(), Some("Liftoff News"));
/// assert_eq!(channel.ttl, Some(60));
/// assert_eq!(channel.items.len(), 1);
/// ```
pub fn parse_rss(xml: &str) -> Result<Channel> {
    let mut reader = FeedReader::new(xml.as_bytes());
    Channel::read_from(&mut reader)
}
