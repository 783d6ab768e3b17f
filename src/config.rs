//! Reader and writer configuration

/// Default nesting limit inside one captured element
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for reading feeds
///
/// # Example
///
/// ```
/// use rss_mapper::ReaderConfig;
///
/// // Defaults: values kept verbatim, 64 levels of nesting
/// let config = ReaderConfig::default();
/// assert_eq!(config.max_depth, 64);
/// assert!(!config.trim_values);
///
/// // Custom configuration
/// let config = ReaderConfig {
///     max_depth: 16,
///     trim_values: false,
///     description_as_content: true,
/// };
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderConfig {
    /// Maximum element nesting inside a single captured element.
    ///
    /// Deeper documents fail with [`FeedError::Malformed`](crate::FeedError::Malformed).
    #[cfg_attr(feature = "serde", serde(default = "default_max_depth"))]
    pub max_depth: usize,

    /// Trim surrounding whitespace from element values.
    ///
    /// Default: `false`. Whitespace-only values become absent either way.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trim_values: bool,

    /// Move an item's description into its content when the item carries
    /// no distinct content element.
    ///
    /// Default: `false` (description stays where it was read from)
    #[cfg_attr(feature = "serde", serde(default))]
    pub description_as_content: bool,
}

#[cfg(feature = "serde")]
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl ReaderConfig {
    /// Default settings with a shallow nesting limit
    pub fn strict() -> Self {
        Self {
            max_depth: 16,
            trim_values: false,
            description_as_content: false,
        }
    }

    /// Values trimmed, descriptions normalized into content
    pub fn lenient() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trim_values: true,
            description_as_content: true,
        }
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trim_values: false,
            description_as_content: false,
        }
    }
}

/// Configuration for writing feeds
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriterConfig {
    /// Indent nested elements by this many spaces; `None` writes compact output
    #[cfg_attr(feature = "serde", serde(default))]
    pub indent: Option<usize>,

    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root element
    #[cfg_attr(feature = "serde", serde(default = "default_xml_declaration"))]
    pub xml_declaration: bool,
}

#[cfg(feature = "serde")]
fn default_xml_declaration() -> bool {
    true
}

impl WriterConfig {
    /// Indented output, two spaces per level
    pub fn pretty() -> Self {
        Self {
            indent: Some(2),
            xml_declaration: true,
        }
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: None,
            xml_declaration: true,
        }
    }
}
