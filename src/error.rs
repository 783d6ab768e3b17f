//! Feed mapping error types

use thiserror::Error;

/// Errors raised while reading or writing a feed
#[derive(Error, Debug)]
pub enum FeedError {
    /// IO error on the underlying transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML tokenizer error (malformed document)
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Low-level XML problem outside the tokenizer (bad attribute, truncated subtree)
    #[error("Malformed XML: {0}")]
    Malformed(String),

    /// Document does not follow the feed format structure
    #[error("Format error: {0}")]
    Format(String),

    /// Session read against an element of a different type
    #[error("Expected {expected} element, found {found}")]
    ElementMismatch {
        /// Element type the caller asked for
        expected: String,
        /// Element type (and name) at the cursor
        found: String,
    },

    /// Required field missing
    #[error("Missing required {field} in <{element}>")]
    MissingField {
        /// Element being read or written
        element: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// Value of a required field could not be parsed
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue {
        /// Field the value belongs to
        field: String,
        /// Raw text
        value: String,
    },

    /// Caller supplied an unusable argument; nothing was written
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Serialized output was not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl FeedError {
    /// Structural format error: the document or entity breaks a feed format rule
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            FeedError::Format(_)
                | FeedError::ElementMismatch { .. }
                | FeedError::MissingField { .. }
                | FeedError::InvalidValue { .. }
        )
    }

    /// Argument error: rejected before any output was produced
    pub fn is_argument_error(&self) -> bool {
        matches!(self, FeedError::InvalidArgument(_))
    }

    pub(crate) fn missing(element: impl Into<String>, field: &'static str) -> Self {
        FeedError::MissingField {
            element: element.into(),
            field,
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        FeedError::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    pub(crate) fn malformed(err: impl std::fmt::Display) -> Self {
        FeedError::Malformed(err.to_string())
    }
}

/// Result type alias using FeedError
pub type Result<T> = std::result::Result<T, FeedError>;
