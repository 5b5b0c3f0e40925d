//! Application services
//!
//! Services depend on port traits, not concrete infrastructure
//! implementations.

pub mod fullscreen_service;
pub mod playback_environment;

pub use fullscreen_service::{toggle_fullscreen, DoubleTapFullscreen, FullscreenToggle};
pub use playback_environment::{Conditions, PlaybackEnvironment};
