//! Feed sessions
//!
//! [`FeedReader`] and [`FeedWriter`] pair the streaming adapters with the
//! RSS 2.0 parser and formatter. Each session owns exactly one cursor.

mod reader;
mod writer;

pub use reader::FeedReader;
pub use writer::FeedWriter;

pub(crate) use writer::day_name;
