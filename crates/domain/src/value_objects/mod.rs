//! Value objects - Immutable objects defined by their attributes

mod device_class;
mod network_tier;
mod playback_config;
mod playback_id;

pub use device_class::{DeviceClass, MOBILE_BREAKPOINT_PX};
pub use network_tier::NetworkTier;
pub use playback_config::{select_config, MaxResolution, PlaybackConfig, PreloadStrategy};
pub use playback_id::{PlaybackId, StreamHosts};
