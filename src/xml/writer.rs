//! Streaming writer adapter
//!
//! [`ContentWriter`] wraps a forward-only quick-xml writer. The first write
//! opens the root element (with the profile version and any passthrough
//! attributes) and the container; [`ContentWriter::finish`] closes both.
//! Each write is fully prepared before anything reaches the sink.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesText, Event};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::emit;
use super::namespace::NamespaceScope;
use crate::config::WriterConfig;
use crate::content::{Attribute, Content};
use crate::element::FeedProfile;
use crate::{FeedError, Result};

/// Forward-only writer emitting [`Content`] elements inside a feed container
pub struct ContentWriter<W> {
    writer: Writer<W>,
    scope: NamespaceScope,
    profile: FeedProfile,
    attributes: Vec<Attribute>,
    config: WriterConfig,
    started: bool,
}

impl<W> ContentWriter<W> {
    /// Writer for a `profile` document
    ///
    /// `attributes` are copied onto the root element when it is opened;
    /// namespace declarations among them bind prefixes for the whole
    /// document.
    pub fn new(
        inner: W,
        profile: FeedProfile,
        attributes: Vec<Attribute>,
        config: WriterConfig,
    ) -> Self {
        let writer = match config.indent {
            Some(width) => Writer::new_with_indent(inner, b' ', width),
            None => Writer::new(inner),
        };
        Self {
            writer,
            scope: NamespaceScope::new(),
            profile,
            attributes,
            config,
            started: false,
        }
    }

    /// Whether the root and container have been opened
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Reference to the underlying sink
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Unwrap the sink without closing open elements
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn opening_events(&mut self, events: &mut Vec<Event<'static>>) -> Result<()> {
        if self.config.xml_declaration {
            events.push(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)));
        }

        let mut root = Content::new(self.profile.root);
        root.add_attribute(Attribute::new(
            self.profile.version_attribute,
            self.profile.version,
        ));
        for attr in &self.attributes {
            let duplicate =
                attr.namespace().is_empty() && attr.name() == self.profile.version_attribute;
            if !duplicate {
                root.add_attribute(attr.clone());
            }
        }

        let (root_start, _) = emit::start_tag(&root, &mut self.scope)?;
        events.push(Event::Start(root_start));
        let (container_start, _) =
            emit::start_tag(&Content::new(self.profile.container), &mut self.scope)?;
        events.push(Event::Start(container_start));
        Ok(())
    }

    fn closing_events(&mut self, events: &mut Vec<Event<'static>>) {
        events.push(Event::End(BytesEnd::new(self.profile.container)));
        self.scope.pop();
        events.push(Event::End(BytesEnd::new(self.profile.root)));
        self.scope.pop();
    }

    /// Build the events for one write, opening the document first if needed
    ///
    /// On error nothing is emitted and the writer state is unchanged.
    fn prepare<F>(&mut self, body: F) -> Result<Vec<Event<'static>>>
    where
        F: FnOnce(&mut NamespaceScope, &mut Vec<Event<'static>>) -> Result<()>,
    {
        let saved = self.scope.clone();
        let mut events = Vec::new();

        let opened = if self.started {
            Ok(())
        } else {
            self.opening_events(&mut events)
        };
        let result = opened.and_then(|()| body(&mut self.scope, &mut events));

        match result {
            Ok(()) => {
                self.started = true;
                Ok(events)
            }
            Err(e) => {
                self.scope = saved;
                Err(e)
            }
        }
    }

    fn content_events(&mut self, content: &Content) -> Result<Vec<Event<'static>>> {
        self.prepare(|scope, events| emit::element_events(content, scope, events))
    }

    fn raw_events(&mut self, raw: &str) -> Result<Vec<Event<'static>>> {
        if raw.trim().is_empty() {
            return Err(FeedError::InvalidArgument(
                "raw content must not be empty".to_string(),
            ));
        }
        let raw = raw.to_string();
        self.prepare(|_, events| {
            events.push(Event::Text(BytesText::from_escaped(raw)));
            Ok(())
        })
    }

    fn finish_events(&mut self) -> Result<Vec<Event<'static>>> {
        let mut events = self.prepare(|_, _| Ok(()))?;
        self.closing_events(&mut events);
        Ok(events)
    }
}

impl<W: Write> ContentWriter<W> {
    /// Append one element and its subtree
    pub fn write_content(&mut self, content: &Content) -> Result<()> {
        let events = self.content_events(content)?;
        self.write_events(events)
    }

    /// Append pre-serialized XML to the open container
    pub fn write_raw(&mut self, raw: &str) -> Result<()> {
        let events = self.raw_events(raw)?;
        self.write_events(events)
    }

    /// Force buffered output to the sink
    pub fn flush(&mut self) -> Result<()> {
        self.writer.get_mut().flush()?;
        Ok(())
    }

    /// Close the container and root and return the sink
    ///
    /// A writer that never wrote anything still produces a complete, empty
    /// document.
    pub fn finish(mut self) -> Result<W> {
        let events = self.finish_events()?;
        self.write_events(events)?;
        self.flush()?;
        Ok(self.writer.into_inner())
    }

    fn write_events(&mut self, events: Vec<Event<'static>>) -> Result<()> {
        for event in events {
            self.writer.write_event(event)?;
        }
        Ok(())
    }
}

impl<W: AsyncWrite + Unpin> ContentWriter<W> {
    /// Async [`ContentWriter::write_content`]
    pub async fn write_content_async(&mut self, content: &Content) -> Result<()> {
        let events = self.content_events(content)?;
        self.write_events_async(events).await
    }

    /// Async [`ContentWriter::write_raw`]
    pub async fn write_raw_async(&mut self, raw: &str) -> Result<()> {
        let events = self.raw_events(raw)?;
        self.write_events_async(events).await
    }

    /// Async [`ContentWriter::flush`]
    pub async fn flush_async(&mut self) -> Result<()> {
        self.writer.get_mut().flush().await?;
        Ok(())
    }

    /// Async [`ContentWriter::finish`]
    pub async fn finish_async(mut self) -> Result<W> {
        let events = self.finish_events()?;
        self.write_events_async(events).await?;
        self.flush_async().await?;
        Ok(self.writer.into_inner())
    }

    async fn write_events_async(&mut self, events: Vec<Event<'static>>) -> Result<()> {
        for event in events {
            self.writer.write_event_async(event).await?;
        }
        Ok(())
    }
}
