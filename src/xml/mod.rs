//! Streaming XML adapters
//!
//! - `reader`: [`ContentReader`], forward-only element cursor
//! - `writer`: [`ContentWriter`], forward-only element sink
//! - `cursor`: sans-IO state machine shared by the blocking and async drivers
//! - `emit`: content tree to quick-xml events
//! - `namespace`: in-scope prefix bindings

mod cursor;
mod emit;
mod namespace;
mod reader;
mod writer;

pub use self::reader::ContentReader;
pub use self::writer::ContentWriter;

pub(crate) use self::emit::to_string as content_to_string;
