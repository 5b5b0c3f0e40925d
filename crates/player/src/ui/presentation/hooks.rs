//! Hooks bridging application services into Dioxus signals

use std::rc::Rc;

use dioxus::prelude::*;
use streamview_domain::PlaybackConfig;

use crate::application::services::{Conditions, PlaybackEnvironment};
use crate::use_platform;

/// Current tier and device class, updated as the platform reports changes.
///
/// Observation stops when the calling component unmounts.
pub fn use_playback_conditions() -> Signal<Conditions> {
    let platform = use_platform();
    let conditions = use_signal(|| {
        Conditions::new(
            platform.connection().current_tier(),
            platform.viewport().current_device_class(),
        )
    });

    use_hook(|| {
        Rc::new(PlaybackEnvironment::observe(&platform, move |next| {
            let mut conditions = conditions;
            conditions.set(next);
        }))
    });

    conditions
}

/// Playback configuration for this render
pub fn use_playback_config() -> PlaybackConfig {
    let conditions = use_playback_conditions();
    let current = *conditions.read();
    current.config()
}
