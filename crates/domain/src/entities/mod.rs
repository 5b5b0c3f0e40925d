//! Domain entities - Core business objects with identity

mod content_item;

pub use content_item::{ContentItem, Creator};
