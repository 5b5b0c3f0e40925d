//! Application layer: gesture recognition, playback sessions and the
//! services that sit between the presentation shell and the platform ports.

pub mod gesture;
pub mod services;
pub mod session;
