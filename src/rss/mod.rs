//! RSS 2.0 format mapping
//!
//! - `parser`: [`FeedParser`], Content to entities
//! - `formatter`: [`FeedFormatter`], entities to Content
//! - `channel`: [`Channel`], whole-document model built on the session types
//!
//! Element names follow <https://www.rssboard.org/rss-specification>. RSS
//! elements carry no namespace; extension modules (such as the content
//! module) are matched by namespace URI.

mod channel;
mod formatter;
mod parser;

pub use channel::{Channel, parse_rss};
pub use formatter::FeedFormatter;
pub use parser::FeedParser;

use crate::element::{ElementType, FeedProfile};

/// Namespace of the content module (`content:encoded`)
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Conventional prefix for [`CONTENT_NAMESPACE`]
pub const CONTENT_PREFIX: &str = "content";

/// RSS 2.0 element names
pub mod names {
    pub const RSS: &str = "rss";
    pub const VERSION: &str = "version";
    pub const CHANNEL: &str = "channel";

    pub const ITEM: &str = "item";
    pub const TITLE: &str = "title";
    pub const LINK: &str = "link";
    pub const DESCRIPTION: &str = "description";
    pub const AUTHOR: &str = "author";
    pub const CATEGORY: &str = "category";
    pub const COMMENTS: &str = "comments";
    pub const ENCLOSURE: &str = "enclosure";
    pub const GUID: &str = "guid";
    pub const PUB_DATE: &str = "pubDate";
    pub const SOURCE: &str = "source";
    pub const ENCODED: &str = "encoded";

    pub const LANGUAGE: &str = "language";
    pub const COPYRIGHT: &str = "copyright";
    pub const MANAGING_EDITOR: &str = "managingEditor";
    pub const WEB_MASTER: &str = "webMaster";
    pub const LAST_BUILD_DATE: &str = "lastBuildDate";
    pub const GENERATOR: &str = "generator";
    pub const DOCS: &str = "docs";
    pub const CLOUD: &str = "cloud";
    pub const TTL: &str = "ttl";
    pub const IMAGE: &str = "image";
    pub const URL: &str = "url";
    pub const SKIP_HOURS: &str = "skipHours";
    pub const HOUR: &str = "hour";
    pub const SKIP_DAYS: &str = "skipDays";
    pub const DAY: &str = "day";

    pub const IS_PERMA_LINK: &str = "isPermaLink";
    pub const LENGTH: &str = "length";
    pub const TYPE: &str = "type";
    pub const DOMAIN: &str = "domain";
    pub const PORT: &str = "port";
    pub const PATH: &str = "path";
    pub const REGISTER_PROCEDURE: &str = "registerProcedure";
    pub const PROTOCOL: &str = "protocol";
}

/// The RSS 2.0 profile: `<rss version="2.0"><channel>...</channel></rss>`
pub const RSS20: FeedProfile = FeedProfile {
    root: names::RSS,
    version_attribute: names::VERSION,
    version: "2.0",
    container: names::CHANNEL,
    element_types: &[
        (names::ITEM, ElementType::Item),
        (names::LINK, ElementType::Link),
        (names::CATEGORY, ElementType::Category),
        (names::AUTHOR, ElementType::Person),
        (names::MANAGING_EDITOR, ElementType::Person),
        (names::WEB_MASTER, ElementType::Person),
        (names::IMAGE, ElementType::Image),
    ],
};
