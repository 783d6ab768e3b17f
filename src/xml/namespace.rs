//! In-scope namespace bindings
//!
//! One frame per open element. The empty prefix is the default namespace;
//! binding it to an empty URI undeclares it.

use crate::content::XML_NAMESPACE;

#[derive(Debug, Default, Clone)]
pub(crate) struct NamespaceScope {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Open a frame for a new element
    pub(crate) fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Close the innermost frame
    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    /// Bind `prefix` (empty for the default namespace) in the innermost frame
    pub(crate) fn declare(&mut self, prefix: &str, uri: &str) {
        if self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.retain(|(p, _)| p != prefix);
            frame.push((prefix.to_string(), uri.to_string()));
        }
    }

    /// URI bound to `prefix`; `None` when unbound
    pub(crate) fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Default namespace URI, empty when none is in effect
    pub(crate) fn default_namespace(&self) -> &str {
        self.resolve("").unwrap_or("")
    }

    /// A non-empty prefix currently bound to `uri`
    pub(crate) fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .filter(|(p, u)| !p.is_empty() && u == uri)
            .map(|(p, _)| p.as_str())
            .find(|p| self.resolve(p) == Some(uri))
    }

    /// Pick a prefix not bound in any frame
    pub(crate) fn unused_prefix(&self) -> String {
        (0..)
            .map(|n| format!("ns{}", n))
            .find(|p| self.resolve(p).is_none())
            .unwrap_or_default()
    }
}
