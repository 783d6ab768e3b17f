//! Feed domain entities
//!
//! This module is organized into submodules:
//! - `types`: Item, Link, Person, Category, Image, Cloud and relationship tags
//! - `builder`: ItemBuilder for assembling items

mod builder;
mod types;

pub use builder::ItemBuilder;
pub use types::{Category, Cloud, Image, Item, Link, LinkRelation, Person, PersonRole};
