//! Feed reading session

use std::io::BufRead;

use tokio::io::AsyncBufRead;
use tracing::{debug, trace};

use crate::config::ReaderConfig;
use crate::content::Content;
use crate::element::{ElementType, FeedProfile};
use crate::model::{Category, Image, Item, Link, Person};
use crate::rss::{FeedParser, RSS20};
use crate::value::FeedValue;
use crate::xml::ContentReader;
use crate::{FeedError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Uninitialized,
    Positioned {
        element_type: ElementType,
        name: String,
    },
    Exhausted,
}

/// Typed, forward-only reader over an RSS 2.0 document
///
/// The session is positioned on one top-level channel element at a time.
/// [`FeedReader::read`] moves to the next element (skipping the current
/// one). The typed `read_*` methods consume the current element, map it and
/// move on to the next one, so a loop checks [`FeedReader::element_type`]
/// after each call instead of calling `read` again.
///
/// # Examples
///
/// ```
/// use rss_mapper::{ElementType, FeedReader};
///
/// let xml = r#"<rss version="2.0"><channel>
///   <title>News</title>
///   <item><title>First</title></item>
///   <item><title>Second</title></item>
/// </channel></rss>"#;
///
/// let mut reader = FeedReader::new(xml.as_bytes());
/// let mut titles = Vec::new();
/// reader.read()?;
/// while let Some(element_type) = reader.element_type() {
///     match element_type {
///         ElementType::Item => titles.push(reader.read_item()?.title.unwrap_or_default()),
///         _ => reader.skip()?,
///     }
/// }
/// assert_eq!(titles, ["First", "Second"]);
/// # Ok::<(), rss_mapper::FeedError>(())
/// ```
pub struct FeedReader<R> {
    reader: ContentReader<R>,
    parser: FeedParser,
    profile: FeedProfile,
    state: State,
}

impl<R> FeedReader<R> {
    /// RSS 2.0 reader with default settings
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ReaderConfig::default())
    }

    /// RSS 2.0 reader with the given settings
    pub fn with_config(inner: R, config: ReaderConfig) -> Self {
        Self {
            reader: ContentReader::new(inner, RSS20, config.clone()),
            parser: FeedParser::new(config),
            profile: RSS20,
            state: State::Uninitialized,
        }
    }

    /// Classified type of the element at the cursor
    ///
    /// `None` before the first [`FeedReader::read`] and after the channel
    /// has been exhausted.
    pub fn element_type(&self) -> Option<ElementType> {
        match &self.state {
            State::Positioned { element_type, .. } => Some(*element_type),
            _ => None,
        }
    }

    /// Local name of the element at the cursor
    pub fn element_name(&self) -> Option<&str> {
        match &self.state {
            State::Positioned { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Head of the element at the cursor (name, namespace, attributes)
    pub fn current(&self) -> Option<&Content> {
        self.reader.current()
    }

    /// Whether every element of the channel has been read
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }

    /// Parser used to map elements
    pub fn parser(&self) -> &FeedParser {
        &self.parser
    }

    fn settle(&mut self) {
        self.state = match self.reader.current() {
            Some(head) => {
                let element_type = self.profile.classify(head.name(), head.namespace());
                trace!("Positioned on <{}> ({})", head.name(), element_type);
                State::Positioned {
                    element_type,
                    name: head.name().to_string(),
                }
            }
            None => {
                debug!("Reached end of <{}>", self.profile.container);
                State::Exhausted
            }
        };
    }

    fn log_opened(&self) {
        debug!(
            "Opened <{} {}=\"{}\"> document",
            self.profile.root, self.profile.version_attribute, self.profile.version
        );
    }

    fn expect(&self, expected: ElementType) -> Result<()> {
        match &self.state {
            State::Positioned { element_type, .. } if *element_type == expected => Ok(()),
            State::Positioned { element_type, name } => Err(FeedError::ElementMismatch {
                expected: expected.to_string(),
                found: format!("{} <{}>", element_type, name),
            }),
            State::Uninitialized | State::Exhausted => Err(FeedError::ElementMismatch {
                expected: expected.to_string(),
                found: "no element".to_string(),
            }),
        }
    }
}

impl<R: BufRead> FeedReader<R> {
    /// Move to the next element of the channel
    ///
    /// The first call validates the `<rss version="2.0">` root and enters
    /// the channel. Returns `false` once the channel is exhausted; an empty
    /// channel is not an error.
    pub fn read(&mut self) -> Result<bool> {
        match self.state {
            State::Exhausted => return Ok(false),
            State::Uninitialized => {
                self.reader.open()?;
                self.log_opened();
            }
            State::Positioned { .. } => {}
        }
        let has_next = self.reader.move_next()?;
        self.settle();
        Ok(has_next)
    }

    /// Consume the current element without mapping it, then advance
    pub fn skip(&mut self) -> Result<()> {
        if self.state == State::Uninitialized {
            self.read()?;
        }
        self.reader.skip()?;
        self.read()?;
        Ok(())
    }

    /// Read the current `<item>`
    pub fn read_item(&mut self) -> Result<Item> {
        let content = self.take(Some(ElementType::Item))?;
        self.parser.parse_item(&content)
    }

    /// Read the current link element
    pub fn read_link(&mut self) -> Result<Link> {
        let content = self.take(Some(ElementType::Link))?;
        self.parser.parse_link(&content)
    }

    /// Read the current `<category>`
    pub fn read_category(&mut self) -> Result<Category> {
        let content = self.take(Some(ElementType::Category))?;
        self.parser.parse_category(&content)
    }

    /// Read the current person element
    pub fn read_person(&mut self) -> Result<Person> {
        let content = self.take(Some(ElementType::Person))?;
        self.parser.parse_person(&content)
    }

    /// Read the current `<image>`
    pub fn read_image(&mut self) -> Result<Image> {
        let content = self.take(Some(ElementType::Image))?;
        self.parser.parse_image(&content)
    }

    /// Read the current unclassified element as raw content
    pub fn read_content(&mut self) -> Result<Content> {
        self.take(Some(ElementType::Content))
    }

    /// Read the current element (of any type) and parse its text
    pub fn read_value<T: FeedValue>(&mut self) -> Result<T> {
        let content = self.take(None)?;
        self.parser.parse_value(&content)
    }

    fn take(&mut self, expected: Option<ElementType>) -> Result<Content> {
        if self.state == State::Uninitialized {
            self.read()?;
        }
        if let Some(expected) = expected {
            self.expect(expected)?;
        } else if self.element_type().is_none() {
            return Err(FeedError::Format("no element at the cursor".to_string()));
        }
        let content = self.reader.read_content()?;
        self.read()?;
        Ok(content)
    }
}

impl<R: AsyncBufRead + Unpin> FeedReader<R> {
    /// Async [`FeedReader::read`]
    pub async fn read_async(&mut self) -> Result<bool> {
        match self.state {
            State::Exhausted => return Ok(false),
            State::Uninitialized => {
                self.reader.open_async().await?;
                self.log_opened();
            }
            State::Positioned { .. } => {}
        }
        let has_next = self.reader.move_next_async().await?;
        self.settle();
        Ok(has_next)
    }

    /// Async [`FeedReader::skip`]
    pub async fn skip_async(&mut self) -> Result<()> {
        if self.state == State::Uninitialized {
            self.read_async().await?;
        }
        self.reader.skip_async().await?;
        self.read_async().await?;
        Ok(())
    }

    /// Async [`FeedReader::read_item`]
    pub async fn read_item_async(&mut self) -> Result<Item> {
        let content = self.take_async(Some(ElementType::Item)).await?;
        self.parser.parse_item(&content)
    }

    /// Async [`FeedReader::read_link`]
    pub async fn read_link_async(&mut self) -> Result<Link> {
        let content = self.take_async(Some(ElementType::Link)).await?;
        self.parser.parse_link(&content)
    }

    /// Async [`FeedReader::read_category`]
    pub async fn read_category_async(&mut self) -> Result<Category> {
        let content = self.take_async(Some(ElementType::Category)).await?;
        self.parser.parse_category(&content)
    }

    /// Async [`FeedReader::read_person`]
    pub async fn read_person_async(&mut self) -> Result<Person> {
        let content = self.take_async(Some(ElementType::Person)).await?;
        self.parser.parse_person(&content)
    }

    /// Async [`FeedReader::read_image`]
    pub async fn read_image_async(&mut self) -> Result<Image> {
        let content = self.take_async(Some(ElementType::Image)).await?;
        self.parser.parse_image(&content)
    }

    /// Async [`FeedReader::read_content`]
    pub async fn read_content_async(&mut self) -> Result<Content> {
        self.take_async(Some(ElementType::Content)).await
    }

    /// Async [`FeedReader::read_value`]
    pub async fn read_value_async<T: FeedValue>(&mut self) -> Result<T> {
        let content = self.take_async(None).await?;
        self.parser.parse_value(&content)
    }

    async fn take_async(&mut self, expected: Option<ElementType>) -> Result<Content> {
        if self.state == State::Uninitialized {
            self.read_async().await?;
        }
        if let Some(expected) = expected {
            self.expect(expected)?;
        } else if self.element_type().is_none() {
            return Err(FeedError::Format("no element at the cursor".to_string()));
        }
        let content = self.reader.read_content_async().await?;
        self.read_async().await?;
        Ok(content)
    }
}
