//! UI state held in Dioxus signals

mod feed_state;

pub use feed_state::{use_feed_state, FeedState};
