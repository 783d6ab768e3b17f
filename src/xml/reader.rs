//! Streaming reader adapter
//!
//! [`ContentReader`] wraps a forward-only quick-xml reader. It positions on
//! one element at a time and either materializes it as [`Content`] or skips
//! it; at most one element subtree is held in memory.
//!
//! Blocking methods need `R: BufRead`; the `*_async` methods need
//! `R: tokio::io::AsyncBufRead + Unpin`. Both drive the same cursor.

use std::io::BufRead;

use quick_xml::Reader;
use tokio::io::AsyncBufRead;

use super::cursor::{Cursor, Flow};
use super::emit;
use crate::config::ReaderConfig;
use crate::content::Content;
use crate::element::FeedProfile;
use crate::{FeedError, Result};

/// Forward-only reader producing [`Content`] elements
pub struct ContentReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    cursor: Cursor,
}

impl<R> ContentReader<R> {
    /// Reader over a feed document shaped by `profile`
    pub fn new(inner: R, profile: FeedProfile, config: ReaderConfig) -> Self {
        Self::with_cursor(inner, Cursor::new(Some(profile), config))
    }

    /// Reader over bare elements, with no root or container expected
    pub fn fragment(inner: R, config: ReaderConfig) -> Self {
        Self::with_cursor(inner, Cursor::new(None, config))
    }

    fn with_cursor(inner: R, cursor: Cursor) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            cursor,
        }
    }

    /// Head (name, namespace, attributes) of the element at the cursor
    pub fn current(&self) -> Option<&Content> {
        self.cursor.current()
    }

    /// Whether the cursor sits on an element matching the given name and namespace
    ///
    /// `None` matches anything.
    pub fn is_start_element(&self, name: Option<&str>, namespace: Option<&str>) -> bool {
        self.current().is_some_and(|c| {
            name.is_none_or(|n| c.name() == n) && namespace.is_none_or(|ns| c.namespace() == ns)
        })
    }

    /// Whether the root has been validated and the container entered
    pub fn is_opened(&self) -> bool {
        self.cursor.is_opened()
    }

    /// Whether the container (or input) has been fully read
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    /// Byte offset of the tokenizer in the input
    pub fn buffer_position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn captured(&mut self) -> Result<Content> {
        self.cursor
            .take_captured()
            .ok_or_else(|| FeedError::Malformed("element capture did not complete".to_string()))
    }
}

impl<R: BufRead> ContentReader<R> {
    /// Validate the root element and enter the container
    ///
    /// Idempotent; called implicitly by [`ContentReader::move_next`].
    pub fn open(&mut self) -> Result<()> {
        if self.cursor.begin_open() == Flow::Continue {
            self.drive()?;
        }
        Ok(())
    }

    /// Move to the next element, skipping the current one if unread
    ///
    /// Returns `false` once the container is exhausted; an empty container
    /// is not an error.
    pub fn move_next(&mut self) -> Result<bool> {
        self.open()?;
        if self.current().is_some() {
            self.skip()?;
        }
        if self.cursor.begin_advance()? == Flow::Continue {
            self.drive()?;
        }
        Ok(self.current().is_some())
    }

    /// Consume the current element and return it with its subtree
    pub fn read_content(&mut self) -> Result<Content> {
        if self.cursor.begin_capture()? == Flow::Continue {
            self.drive()?;
        }
        self.captured()
    }

    /// Consume the current element and return its serialized form
    pub fn read_outer_subtree(&mut self) -> Result<String> {
        let content = self.read_content()?;
        emit::to_string(&content)
    }

    /// Consume the current element without materializing it
    pub fn skip(&mut self) -> Result<()> {
        if self.cursor.begin_skip() == Flow::Continue {
            self.drive()?;
        }
        Ok(())
    }

    fn drive(&mut self) -> Result<()> {
        loop {
            let event = self.reader.read_event_into(&mut self.buf)?;
            let flow = self.cursor.feed(event)?;
            self.buf.clear();
            if flow == Flow::Done {
                return Ok(());
            }
        }
    }
}

impl<R: AsyncBufRead + Unpin> ContentReader<R> {
    /// Async [`ContentReader::open`]
    pub async fn open_async(&mut self) -> Result<()> {
        if self.cursor.begin_open() == Flow::Continue {
            self.drive_async().await?;
        }
        Ok(())
    }

    /// Async [`ContentReader::move_next`]
    pub async fn move_next_async(&mut self) -> Result<bool> {
        self.open_async().await?;
        if self.current().is_some() {
            self.skip_async().await?;
        }
        if self.cursor.begin_advance()? == Flow::Continue {
            self.drive_async().await?;
        }
        Ok(self.current().is_some())
    }

    /// Async [`ContentReader::read_content`]
    pub async fn read_content_async(&mut self) -> Result<Content> {
        if self.cursor.begin_capture()? == Flow::Continue {
            self.drive_async().await?;
        }
        self.captured()
    }

    /// Async [`ContentReader::read_outer_subtree`]
    pub async fn read_outer_subtree_async(&mut self) -> Result<String> {
        let content = self.read_content_async().await?;
        emit::to_string(&content)
    }

    /// Async [`ContentReader::skip`]
    pub async fn skip_async(&mut self) -> Result<()> {
        if self.cursor.begin_skip() == Flow::Continue {
            self.drive_async().await?;
        }
        Ok(())
    }

    async fn drive_async(&mut self) -> Result<()> {
        loop {
            let event = self.reader.read_event_into_async(&mut self.buf).await?;
            let flow = self.cursor.feed(event)?;
            self.buf.clear();
            if flow == Flow::Done {
                return Ok(());
            }
        }
    }
}
