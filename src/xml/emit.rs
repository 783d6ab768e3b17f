//! Content -> quick-xml events
//!
//! Events are built in full before anything reaches the sink, so a content
//! tree that cannot be written (empty names) fails without partial output.

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::namespace::NamespaceScope;
use crate::content::Content;
use crate::{FeedError, Result};

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}:{}", prefix, name)
    }
}

/// Start tag for `content`, declaring whatever namespaces it needs
///
/// Opens a namespace frame; the caller pops it once the element is closed.
/// Returns the tag and the qualified name for the matching end tag.
pub(crate) fn start_tag(
    content: &Content,
    scope: &mut NamespaceScope,
) -> Result<(BytesStart<'static>, String)> {
    if content.name().is_empty() {
        return Err(FeedError::InvalidArgument(
            "element name must not be empty".to_string(),
        ));
    }

    scope.push();
    let mut declarations: Vec<(String, String)> = Vec::new();
    let mut declare = |scope: &mut NamespaceScope, prefix: &str, uri: &str| {
        scope.declare(prefix, uri);
        let key = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", prefix)
        };
        declarations.push((key, uri.to_string()));
    };

    // passthrough declarations first so the element itself can use them
    for attr in content.attributes().iter().filter(|a| a.is_namespace_declaration()) {
        declare(scope, attr.name(), attr.value());
    }

    let namespace = content.namespace();
    let qname = if namespace.is_empty() {
        if !scope.default_namespace().is_empty() {
            declare(scope, "", "");
        }
        content.name().to_string()
    } else {
        match content.prefix() {
            Some(p) if scope.resolve(p) == Some(namespace) => qualify(p, content.name()),
            Some(p) if p != "xmlns" => {
                declare(scope, p, namespace);
                qualify(p, content.name())
            }
            _ => {
                if scope.default_namespace() == namespace {
                    content.name().to_string()
                } else if let Some(p) = scope.prefix_for(namespace).map(str::to_string) {
                    qualify(&p, content.name())
                } else {
                    declare(scope, "", namespace);
                    content.name().to_string()
                }
            }
        }
    };

    let mut attributes: Vec<(String, String)> = Vec::new();
    for attr in content.attributes().iter().filter(|a| !a.is_namespace_declaration()) {
        if attr.name().is_empty() {
            return Err(FeedError::InvalidArgument(format!(
                "attribute name on <{}> must not be empty",
                content.name()
            )));
        }
        let key = if attr.namespace().is_empty() {
            attr.name().to_string()
        } else {
            // attributes never take the default namespace
            let prefix = match attr.prefix() {
                Some(p) if !p.is_empty() && scope.resolve(p) == Some(attr.namespace()) => {
                    p.to_string()
                }
                Some(p) if !p.is_empty() && p != "xmlns" && scope.resolve(p).is_none() => {
                    declare(scope, p, attr.namespace());
                    p.to_string()
                }
                _ => match scope.prefix_for(attr.namespace()).map(str::to_string) {
                    Some(p) => p,
                    None => {
                        let p = scope.unused_prefix();
                        declare(scope, &p, attr.namespace());
                        p
                    }
                },
            };
            qualify(&prefix, attr.name())
        };
        attributes.push((key, attr.value().to_string()));
    }

    let mut start = BytesStart::new(qname.clone());
    for (key, value) in declarations.iter().chain(attributes.iter()) {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    Ok((start, qname))
}

/// Append the events for `content` and its subtree
pub(crate) fn element_events(
    content: &Content,
    scope: &mut NamespaceScope,
    events: &mut Vec<Event<'static>>,
) -> Result<()> {
    let (start, qname) = start_tag(content, scope)?;
    let value = content.value().filter(|v| !v.is_empty());

    if value.is_none() && content.fields().is_empty() {
        events.push(Event::Empty(start));
        scope.pop();
        return Ok(());
    }

    events.push(Event::Start(start));
    if let Some(value) = value {
        events.push(Event::Text(BytesText::from_escaped(escape(value).into_owned())));
    }
    for field in content.fields() {
        element_events(field, scope, events)?;
    }
    events.push(Event::End(BytesEnd::new(qname)));
    scope.pop();
    Ok(())
}

/// Serialize one element as a standalone XML fragment
pub(crate) fn to_string(content: &Content) -> Result<String> {
    let mut events = Vec::new();
    element_events(content, &mut NamespaceScope::new(), &mut events)?;

    let mut writer = Writer::new(Vec::new());
    for event in events {
        writer.write_event(event)?;
    }
    Ok(String::from_utf8(writer.into_inner())?)
}
