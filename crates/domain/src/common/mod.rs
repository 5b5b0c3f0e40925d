//! Common utility functions shared by the domain and the player.
//!
//! Pure functions only: no side effects, no I/O, and everything must build
//! for both native and WASM targets.

pub mod count;
pub mod duration;
pub mod string;

pub use count::format_compact_count;
pub use duration::format_duration;
pub use string::{none_if_empty, some_if_not_empty};
