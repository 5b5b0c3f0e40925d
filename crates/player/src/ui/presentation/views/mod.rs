//! Top-level views

mod feed;

pub use feed::FeedView;
