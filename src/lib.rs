#![doc = include_str!("../README.md")]

mod config;
/// Format-neutral XML content model
pub mod content;
mod element;
mod error;
/// Feed domain entities
pub mod model;
/// RSS 2.0 parser, formatter and channel model
pub mod rss;
mod session;
mod value;
/// Streaming XML reader and writer adapters
pub mod xml;

pub use config::{DEFAULT_MAX_DEPTH, ReaderConfig, WriterConfig};
pub use content::{Attribute, Content};
pub use element::{ElementType, FeedProfile};
pub use error::{FeedError, Result};
pub use model::{
    Category, Cloud, Image, Item, ItemBuilder, Link, LinkRelation, Person, PersonRole,
};
pub use rss::{CONTENT_NAMESPACE, Channel, FeedFormatter, FeedParser, RSS20, parse_rss};
pub use session::{FeedReader, FeedWriter};
pub use value::{FeedValue, parse_date};
pub use xml::{ContentReader, ContentWriter};
