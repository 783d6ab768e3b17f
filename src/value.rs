//! Typed scalar values
//!
//! Element text and attribute values are strings on the wire. [`FeedValue`]
//! converts them to and from the scalar types feeds carry: text, numbers,
//! booleans, RFC 822 dates and URIs. Formatting is locale-invariant and
//! round-trips through parsing.

use chrono::{DateTime, FixedOffset, Utc};
use url::Url;

use crate::{FeedError, Result};

/// A scalar that can be read from and written to element text
pub trait FeedValue: Sized {
    /// Parse from wire text; `None` when the text is not a valid value
    fn parse_value(text: &str) -> Option<Self>;

    /// Format as wire text
    fn format_value(&self) -> String;
}

impl FeedValue for String {
    fn parse_value(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn format_value(&self) -> String {
        self.clone()
    }
}

/// Booleans are matched case-insensitively (`True`, `FALSE`, ...)
impl FeedValue for bool {
    fn parse_value(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn format_value(&self) -> String {
        if *self { "true" } else { "false" }.to_string()
    }
}

macro_rules! numeric_feed_value {
    ($($ty:ty),*) => {
        $(
            impl FeedValue for $ty {
                fn parse_value(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn format_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_feed_value!(u8, u16, u32, u64, i32, i64, f64);

impl FeedValue for DateTime<Utc> {
    fn parse_value(text: &str) -> Option<Self> {
        parse_date(text).ok()
    }

    fn format_value(&self) -> String {
        self.to_rfc2822()
    }
}

impl FeedValue for DateTime<FixedOffset> {
    fn parse_value(text: &str) -> Option<Self> {
        parse_date_with_offset(text)
    }

    fn format_value(&self) -> String {
        self.to_rfc2822()
    }
}

/// Absolute URIs only; relative references do not parse
impl FeedValue for Url {
    fn parse_value(text: &str) -> Option<Self> {
        Url::parse(text.trim()).ok()
    }

    fn format_value(&self) -> String {
        self.as_str().to_string()
    }
}

/// Parses an RSS date (RFC 822 / RFC 2822)
///
/// Accepts the RFC 2822 form feeds use, `GMT` and other obsolete zone
/// names, and falls back to RFC 3339 for feeds that emit ISO dates.
///
/// # Examples
///
/// ```
/// use rss_mapper::parse_date;
///
/// let date = parse_date("Tue, 20 Jan 2026 12:00:00 +0000").unwrap();
/// assert_eq!(date.to_rfc3339(), "2026-01-20T12:00:00+00:00");
///
/// assert!(parse_date("Tue, 20 Jan 2026 12:00:00 GMT").is_ok());
/// assert!(parse_date("2026-01-20T12:00:00Z").is_ok());
/// assert!(parse_date("yesterday").is_err());
/// ```
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    parse_date_with_offset(date_str)
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| FeedError::invalid("date", date_str))
}

fn parse_date_with_offset(date_str: &str) -> Option<DateTime<FixedOffset>> {
    let date_str = date_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return Some(dt);
    }

    // Some feeds spell the zone as "GMT" in places chrono rejects
    if date_str.contains("GMT") {
        let normalized = date_str.replace("GMT", "+0000");
        if let Ok(dt) = DateTime::parse_from_rfc2822(&normalized) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(date_str).ok()
}
