//! State containers for player-side dependency injection
//!
//! This module contains DI containers that aggregate adapters behind ports.

mod platform;

pub use platform::Platform;
