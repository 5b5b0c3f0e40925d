extern crate self as streamview_domain;

pub mod common;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{ContentItem, Creator};

pub use error::DomainError;

pub use value_objects::{
    select_config, DeviceClass, MaxResolution, NetworkTier, PlaybackConfig, PlaybackId,
    PreloadStrategy, StreamHosts, MOBILE_BREAKPOINT_PX,
};

pub use common::{format_compact_count, format_duration, none_if_empty, some_if_not_empty};
