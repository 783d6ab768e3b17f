//! Sans-IO cursor over quick-xml events
//!
//! The cursor holds all reading state: namespace scope, the element at the
//! cursor, and the partially built subtree of a capture in progress. The
//! blocking and async drivers in [`super::reader`] only pull events from
//! the tokenizer and feed them here, one at a time, until an operation
//! reports [`Flow::Done`].

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use tracing::trace;

use super::namespace::NamespaceScope;
use crate::config::ReaderConfig;
use crate::content::{Attribute, Content};
use crate::element::FeedProfile;
use crate::{FeedError, Result};

/// Whether the current operation needs more events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Idle,
    OpenRoot,
    OpenContainer,
    Advance,
    Capture,
    Skip,
}

/// Element at the cursor: its start tag has been read, its subtree has not
#[derive(Debug)]
struct Current {
    head: Content,
    empty: bool,
}

#[derive(Debug)]
pub(crate) struct Cursor {
    profile: Option<FeedProfile>,
    config: ReaderConfig,
    scope: NamespaceScope,
    op: Op,
    current: Option<Current>,
    stack: Vec<Content>,
    skip_depth: usize,
    captured: Option<Content>,
    opened: bool,
    exhausted: bool,
}

fn lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

impl Cursor {
    /// Cursor expecting a `profile` root, or a bare fragment when `None`
    pub(crate) fn new(profile: Option<FeedProfile>, config: ReaderConfig) -> Self {
        Self {
            profile,
            config,
            scope: NamespaceScope::new(),
            op: Op::Idle,
            current: None,
            stack: Vec::new(),
            skip_depth: 0,
            captured: None,
            opened: false,
            exhausted: false,
        }
    }

    pub(crate) fn current(&self) -> Option<&Content> {
        self.current.as_ref().map(|c| &c.head)
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn is_opened(&self) -> bool {
        self.opened
    }

    pub(crate) fn take_captured(&mut self) -> Option<Content> {
        self.captured.take()
    }

    /// Verify the root element and version, then enter the container
    pub(crate) fn begin_open(&mut self) -> Flow {
        if self.opened {
            return Flow::Done;
        }
        if self.profile.is_none() {
            self.opened = true;
            return Flow::Done;
        }
        self.op = Op::OpenRoot;
        Flow::Continue
    }

    /// Move to the next sibling element; the current one must be consumed
    pub(crate) fn begin_advance(&mut self) -> Result<Flow> {
        if self.current.is_some() {
            return Err(FeedError::Malformed(
                "cannot advance past an unconsumed element".to_string(),
            ));
        }
        if self.exhausted {
            return Ok(Flow::Done);
        }
        self.op = Op::Advance;
        Ok(Flow::Continue)
    }

    /// Materialize the current element and its subtree
    pub(crate) fn begin_capture(&mut self) -> Result<Flow> {
        let current = self
            .current
            .take()
            .ok_or_else(|| FeedError::Format("no element at the cursor".to_string()))?;

        let mut head = current.head;
        if current.empty {
            head.finish_value(self.config.trim_values);
            self.captured = Some(head);
            return Ok(Flow::Done);
        }

        self.stack.clear();
        self.stack.push(head);
        self.op = Op::Capture;
        Ok(Flow::Continue)
    }

    /// Consume the current element without materializing it
    pub(crate) fn begin_skip(&mut self) -> Flow {
        match self.current.take() {
            Some(current) if !current.empty => {
                trace!("Skipping <{}>", current.head.name());
                self.skip_depth = 1;
                self.op = Op::Skip;
                Flow::Continue
            }
            _ => Flow::Done,
        }
    }

    /// Feed one tokenizer event to the operation in progress
    pub(crate) fn feed(&mut self, event: Event<'_>) -> Result<Flow> {
        let flow = match self.op {
            Op::Idle => Flow::Done,
            Op::OpenRoot => self.open_root(event)?,
            Op::OpenContainer => self.open_container(event)?,
            Op::Advance => self.advance(event)?,
            Op::Capture => self.capture(event)?,
            Op::Skip => self.skip(event)?,
        };
        if flow == Flow::Done {
            self.op = Op::Idle;
        }
        Ok(flow)
    }

    fn open_root(&mut self, event: Event<'_>) -> Result<Flow> {
        let Some(profile) = self.profile else {
            return Ok(Flow::Done);
        };
        let (head, empty) = match event {
            Event::Start(ref e) => (self.element_head(e)?, false),
            Event::Empty(ref e) => (self.element_head(e)?, true),
            Event::Eof => {
                return Err(FeedError::Format(format!(
                    "document has no <{}> root element",
                    profile.root
                )));
            }
            Event::End(_) => return Err(FeedError::Malformed("unexpected end tag".to_string())),
            _ => return Ok(Flow::Continue),
        };

        if !head.is(profile.root, "") {
            return Err(FeedError::Format(format!(
                "expected <{}> root element, found <{}>",
                profile.root,
                head.name()
            )));
        }
        match head.attribute(profile.version_attribute, "") {
            Some(version) if version == profile.version => {}
            Some(version) => {
                return Err(FeedError::Format(format!(
                    "unsupported <{}> version {:?}, expected {:?}",
                    profile.root, version, profile.version
                )));
            }
            None => {
                return Err(FeedError::Format(format!(
                    "<{}> root element has no {} attribute",
                    profile.root, profile.version_attribute
                )));
            }
        }
        if empty {
            return Err(FeedError::Format(format!(
                "<{}> has no <{}> element",
                profile.root, profile.container
            )));
        }

        self.op = Op::OpenContainer;
        Ok(Flow::Continue)
    }

    fn open_container(&mut self, event: Event<'_>) -> Result<Flow> {
        let Some(profile) = self.profile else {
            return Ok(Flow::Done);
        };
        let (head, empty) = match event {
            Event::Start(ref e) => (self.element_head(e)?, false),
            Event::Empty(ref e) => {
                let head = self.element_head(e)?;
                self.scope.pop();
                (head, true)
            }
            Event::End(_) | Event::Eof => {
                return Err(FeedError::Format(format!(
                    "<{}> has no <{}> element",
                    profile.root, profile.container
                )));
            }
            _ => return Ok(Flow::Continue),
        };

        if !head.is(profile.container, "") {
            return Err(FeedError::Format(format!(
                "expected <{}> inside <{}>, found <{}>",
                profile.container,
                profile.root,
                head.name()
            )));
        }

        self.opened = true;
        self.exhausted = empty;
        Ok(Flow::Done)
    }

    fn advance(&mut self, event: Event<'_>) -> Result<Flow> {
        match event {
            Event::Start(ref e) => {
                let head = self.element_head(e)?;
                self.current = Some(Current { head, empty: false });
                Ok(Flow::Done)
            }
            Event::Empty(ref e) => {
                let head = self.element_head(e)?;
                self.scope.pop();
                self.current = Some(Current { head, empty: true });
                Ok(Flow::Done)
            }
            Event::End(_) => {
                // container closed
                self.scope.pop();
                self.exhausted = true;
                Ok(Flow::Done)
            }
            Event::Eof => {
                self.exhausted = true;
                Ok(Flow::Done)
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn capture(&mut self, event: Event<'_>) -> Result<Flow> {
        match event {
            Event::Start(ref e) => {
                if self.stack.len() >= self.config.max_depth {
                    return Err(FeedError::Malformed(format!(
                        "element nesting exceeds maximum of {} levels",
                        self.config.max_depth
                    )));
                }
                let head = self.element_head(e)?;
                self.stack.push(head);
            }
            Event::Empty(ref e) => {
                let mut head = self.element_head(e)?;
                self.scope.pop();
                head.finish_value(self.config.trim_values);
                if let Some(parent) = self.stack.last_mut() {
                    parent.add_field(head);
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape().map_err(FeedError::malformed)?;
                if let Some(top) = self.stack.last_mut() {
                    top.append_text(&text);
                }
            }
            Event::CData(ref e) => {
                let text = std::str::from_utf8(e).map_err(FeedError::malformed)?;
                if let Some(top) = self.stack.last_mut() {
                    top.append_text(text);
                }
            }
            Event::End(_) => {
                self.scope.pop();
                let mut done = self
                    .stack
                    .pop()
                    .ok_or_else(|| FeedError::Malformed("unbalanced end tag".to_string()))?;
                done.finish_value(self.config.trim_values);
                match self.stack.last_mut() {
                    Some(parent) => parent.add_field(done),
                    None => {
                        self.captured = Some(done);
                        return Ok(Flow::Done);
                    }
                }
            }
            Event::Eof => {
                let name = self.stack.first().map(|c| c.name().to_string());
                return Err(FeedError::Malformed(format!(
                    "unexpected end of input inside <{}>",
                    name.unwrap_or_default()
                )));
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn skip(&mut self, event: Event<'_>) -> Result<Flow> {
        match event {
            Event::Start(_) => {
                self.scope.push();
                self.skip_depth += 1;
            }
            Event::End(_) => {
                self.scope.pop();
                self.skip_depth -= 1;
                if self.skip_depth == 0 {
                    return Ok(Flow::Done);
                }
            }
            Event::Eof => {
                return Err(FeedError::Malformed(
                    "unexpected end of input while skipping element".to_string(),
                ));
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    /// Build the head of an element and open its namespace frame
    ///
    /// The caller pops the frame: immediately for empty elements, on the
    /// matching end tag otherwise.
    fn element_head(&mut self, e: &BytesStart<'_>) -> Result<Content> {
        self.scope.push();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(FeedError::malformed)?;
            let value = attr.unescape_value().map_err(FeedError::malformed)?.into_owned();
            let key = attr.key;
            let raw_key = key.as_ref();

            if raw_key == b"xmlns" {
                self.scope.declare("", &value);
                continue;
            }
            if let Some(prefix) = raw_key.strip_prefix(b"xmlns:") {
                self.scope.declare(&lossy(prefix), &value);
                continue;
            }

            let prefix = key.prefix().map(|p| lossy(p.as_ref()));
            let local = lossy(key.local_name().as_ref());
            attributes.push((prefix, local, value));
        }

        let name = e.name();
        let prefix = name.prefix().map(|p| lossy(p.as_ref()));
        let namespace = match &prefix {
            // an undeclared prefix stands for itself
            Some(p) => self.scope.resolve(p).unwrap_or(p).to_string(),
            None => self.scope.default_namespace().to_string(),
        };

        let mut head = Content::new(lossy(name.local_name().as_ref())).in_namespace(namespace);
        head.set_prefix(prefix);

        for (prefix, local, value) in attributes {
            let namespace = match &prefix {
                Some(p) => self.scope.resolve(p).unwrap_or(p).to_string(),
                None => String::new(),
            };
            let mut attribute = Attribute::with_namespace(local, namespace, value);
            attribute.set_prefix(prefix);
            head.add_attribute(attribute);
        }

        Ok(head)
    }
}
