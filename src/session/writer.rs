//! Feed writing session

use std::io::Write;

use chrono::{DateTime, Utc, Weekday};
use tokio::io::AsyncWrite;
use tracing::debug;
use url::Url;

use crate::config::WriterConfig;
use crate::content::{Attribute, Content};
use crate::model::{Category, Cloud, Image, Item, Link, Person};
use crate::rss::{FeedFormatter, RSS20, names};
use crate::value::FeedValue;
use crate::xml::ContentWriter;
use crate::Result;

/// Full English day name, as `<skipDays>` requires
pub(crate) fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Typed, forward-only writer producing an RSS 2.0 document
///
/// Elements are appended to the channel in call order. The `<rss>` root and
/// `<channel>` are opened by the first write; [`FeedWriter::finish`] closes
/// them. An entity that fails validation produces no output.
///
/// # Examples
///
/// ```
/// use rss_mapper::{FeedWriter, ItemBuilder, WriterConfig};
///
/// let config = WriterConfig { indent: None, xml_declaration: false };
/// let mut writer = FeedWriter::with_config(Vec::new(), Vec::new(), config);
/// writer.write_title("News")?;
/// writer.write_item(&ItemBuilder::new().title("Hello").build()?)?;
/// let xml = String::from_utf8(writer.finish()?).unwrap();
/// assert_eq!(
///     xml,
///     r#"<rss version="2.0"><channel><title>News</title><item><title>Hello</title></item></channel></rss>"#
/// );
/// # Ok::<(), rss_mapper::FeedError>(())
/// ```
pub struct FeedWriter<W> {
    writer: ContentWriter<W>,
    formatter: FeedFormatter,
}

impl<W> FeedWriter<W> {
    /// RSS 2.0 writer with default settings
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, Vec::new(), WriterConfig::default())
    }

    /// RSS 2.0 writer with root passthrough attributes and settings
    ///
    /// `attributes` are copied onto `<rss>`; use
    /// [`Attribute::namespace_declaration`] to bind extension prefixes for
    /// the whole document.
    pub fn with_config(inner: W, attributes: Vec<Attribute>, config: WriterConfig) -> Self {
        Self {
            writer: ContentWriter::new(inner, RSS20, attributes, config),
            formatter: FeedFormatter::new(),
        }
    }

    /// Formatter used to map entities
    pub fn formatter(&self) -> &FeedFormatter {
        &self.formatter
    }

    /// Whether the root and channel have been opened
    pub fn is_started(&self) -> bool {
        self.writer.is_started()
    }

    /// Reference to the underlying sink
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    fn text(name: &str, value: &str) -> Content {
        Content::with_value(name, value)
    }

    fn skip_hours_content(hours: &[u8]) -> Content {
        let mut element = Content::new(names::SKIP_HOURS);
        for hour in hours {
            element.add_field(Content::with_value(names::HOUR, hour.format_value()));
        }
        element
    }

    fn skip_days_content(days: &[Weekday]) -> Content {
        let mut element = Content::new(names::SKIP_DAYS);
        for day in days {
            element.add_field(Content::with_value(names::DAY, day_name(*day)));
        }
        element
    }
}

impl<W: Write> FeedWriter<W> {
    /// Write an `<item>`
    pub fn write_item(&mut self, item: &Item) -> Result<()> {
        let content = self.formatter.create_item_content(item)?;
        self.writer.write_content(&content)
    }

    /// Write a link element (shape chosen by relationship)
    pub fn write_link(&mut self, link: &Link) -> Result<()> {
        let content = self.formatter.create_link_content(link)?;
        self.writer.write_content(&content)
    }

    /// Write a `<category>`
    pub fn write_category(&mut self, category: &Category) -> Result<()> {
        let content = self.formatter.create_category_content(category)?;
        self.writer.write_content(&content)
    }

    /// Write a person element (`author`, `managingEditor`, `webMaster`)
    pub fn write_person(&mut self, person: &Person) -> Result<()> {
        let content = self.formatter.create_person_content(person)?;
        self.writer.write_content(&content)
    }

    /// Write an `<image>`
    pub fn write_image(&mut self, image: &Image) -> Result<()> {
        let content = self.formatter.create_image_content(image)?;
        self.writer.write_content(&content)
    }

    /// Write an arbitrary element
    pub fn write_content(&mut self, content: &Content) -> Result<()> {
        self.writer.write_content(content)
    }

    /// Write `<name>value</name>`
    pub fn write_value<T: FeedValue>(&mut self, name: &str, value: &T) -> Result<()> {
        let content = self.formatter.create_value_content(name, value);
        self.writer.write_content(&content)
    }

    /// Append pre-serialized XML to the channel
    pub fn write_raw(&mut self, raw: &str) -> Result<()> {
        self.writer.write_raw(raw)
    }

    /// Channel `<title>`
    pub fn write_title(&mut self, title: &str) -> Result<()> {
        self.writer.write_content(&Self::text(names::TITLE, title))
    }

    /// Channel `<description>`
    pub fn write_description(&mut self, description: &str) -> Result<()> {
        self.writer
            .write_content(&Self::text(names::DESCRIPTION, description))
    }

    /// Channel `<language>` (e.g. `en-us`)
    pub fn write_language(&mut self, language: &str) -> Result<()> {
        self.writer.write_content(&Self::text(names::LANGUAGE, language))
    }

    /// Channel `<copyright>`
    pub fn write_copyright(&mut self, copyright: &str) -> Result<()> {
        self.writer.write_content(&Self::text(names::COPYRIGHT, copyright))
    }

    /// Channel `<generator>`
    pub fn write_generator(&mut self, generator: &str) -> Result<()> {
        self.writer.write_content(&Self::text(names::GENERATOR, generator))
    }

    /// Channel `<docs>`
    pub fn write_docs(&mut self, docs: &Url) -> Result<()> {
        self.write_value(names::DOCS, docs)
    }

    /// Channel `<pubDate>`
    pub fn write_pub_date(&mut self, date: &DateTime<Utc>) -> Result<()> {
        self.write_value(names::PUB_DATE, date)
    }

    /// Channel `<lastBuildDate>`
    pub fn write_last_build_date(&mut self, date: &DateTime<Utc>) -> Result<()> {
        self.write_value(names::LAST_BUILD_DATE, date)
    }

    /// Channel `<ttl>` in minutes
    pub fn write_ttl(&mut self, minutes: u32) -> Result<()> {
        self.write_value(names::TTL, &minutes)
    }

    /// Channel `<skipHours>`, hours 0-23 in GMT
    pub fn write_skip_hours(&mut self, hours: &[u8]) -> Result<()> {
        self.writer.write_content(&Self::skip_hours_content(hours))
    }

    /// Channel `<skipDays>`
    pub fn write_skip_days(&mut self, days: &[Weekday]) -> Result<()> {
        self.writer.write_content(&Self::skip_days_content(days))
    }

    /// Channel `<cloud>`
    pub fn write_cloud(&mut self, cloud: &Cloud) -> Result<()> {
        let content = self.formatter.create_cloud_content(cloud);
        self.writer.write_content(&content)
    }

    /// Force buffered output to the sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    /// Close `<channel>` and `<rss>` and return the sink
    pub fn finish(self) -> Result<W> {
        debug!("Finishing feed document");
        self.writer.finish()
    }
}

impl<W: AsyncWrite + Unpin> FeedWriter<W> {
    /// Async [`FeedWriter::write_item`]
    pub async fn write_item_async(&mut self, item: &Item) -> Result<()> {
        let content = self.formatter.create_item_content(item)?;
        self.writer.write_content_async(&content).await
    }

    /// Async [`FeedWriter::write_link`]
    pub async fn write_link_async(&mut self, link: &Link) -> Result<()> {
        let content = self.formatter.create_link_content(link)?;
        self.writer.write_content_async(&content).await
    }

    /// Async [`FeedWriter::write_category`]
    pub async fn write_category_async(&mut self, category: &Category) -> Result<()> {
        let content = self.formatter.create_category_content(category)?;
        self.writer.write_content_async(&content).await
    }

    /// Async [`FeedWriter::write_person`]
    pub async fn write_person_async(&mut self, person: &Person) -> Result<()> {
        let content = self.formatter.create_person_content(person)?;
        self.writer.write_content_async(&content).await
    }

    /// Async [`FeedWriter::write_image`]
    pub async fn write_image_async(&mut self, image: &Image) -> Result<()> {
        let content = self.formatter.create_image_content(image)?;
        self.writer.write_content_async(&content).await
    }

    /// Async [`FeedWriter::write_content`]
    pub async fn write_content_async(&mut self, content: &Content) -> Result<()> {
        self.writer.write_content_async(content).await
    }

    /// Async [`FeedWriter::write_value`]
    ///
    /// Channel metadata such as `title` or `ttl` is written with this.
    pub async fn write_value_async<T: FeedValue>(&mut self, name: &str, value: &T) -> Result<()> {
        let content = self.formatter.create_value_content(name, value);
        self.writer.write_content_async(&content).await
    }

    /// Async [`FeedWriter::write_raw`]
    pub async fn write_raw_async(&mut self, raw: &str) -> Result<()> {
        self.writer.write_raw_async(raw).await
    }

    /// Async [`FeedWriter::flush`]
    pub async fn flush_async(&mut self) -> Result<()> {
        self.writer.flush_async().await
    }

    /// Async [`FeedWriter::finish`]
    pub async fn finish_async(self) -> Result<W> {
        debug!("Finishing feed document");
        self.writer.finish_async().await
    }
}
