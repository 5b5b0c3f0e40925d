//! Playback environment service
//!
//! Tracks the current network tier and device class by observing the
//! platform ports, and derives the playback configuration from them. The
//! configuration is never stored: it is recomputed from the latest
//! conditions every time it is asked for.

use std::cell::Cell;
use std::rc::Rc;

use streamview_domain::{select_config, DeviceClass, NetworkTier, PlaybackConfig};

use crate::ports::outbound::Subscription;
use crate::state::Platform;

/// Latest observed environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conditions {
    pub tier: NetworkTier,
    pub device: DeviceClass,
}

impl Conditions {
    pub fn new(tier: NetworkTier, device: DeviceClass) -> Self {
        Self { tier, device }
    }

    pub fn config(&self) -> PlaybackConfig {
        select_config(self.tier, self.device)
    }
}

/// Observes connection quality and viewport for as long as it is alive
pub struct PlaybackEnvironment {
    conditions: Rc<Cell<Conditions>>,
    _subscriptions: [Subscription; 2],
}

impl PlaybackEnvironment {
    /// Start observing. `on_change` runs after every tier or device change.
    pub fn observe(platform: &Platform, on_change: impl Fn(Conditions) + 'static) -> Self {
        let connection = platform.connection();
        let viewport = platform.viewport();

        let conditions = Rc::new(Cell::new(Conditions::new(
            connection.current_tier(),
            viewport.current_device_class(),
        )));
        let on_change: Rc<dyn Fn(Conditions)> = Rc::new(on_change);

        let tier_changed = {
            let (conditions, on_change) = (Rc::clone(&conditions), Rc::clone(&on_change));
            Rc::new(move |tier: NetworkTier| {
                let next = Conditions {
                    tier,
                    ..conditions.get()
                };
                if conditions.replace(next) != next {
                    tracing::debug!("Network tier now {} ({:?})", tier, next.config());
                    on_change(next);
                }
            })
        };

        let device_changed = {
            let (conditions, on_change) = (Rc::clone(&conditions), Rc::clone(&on_change));
            Rc::new(move |device: DeviceClass| {
                let next = Conditions {
                    device,
                    ..conditions.get()
                };
                if conditions.replace(next) != next {
                    tracing::debug!("Device class now {} ({:?})", device, next.config());
                    on_change(next);
                }
            })
        };

        Self {
            conditions,
            _subscriptions: [
                Subscription::connection(connection, tier_changed),
                Subscription::viewport(viewport, device_changed),
            ],
        }
    }

    pub fn conditions(&self) -> Conditions {
        self.conditions.get()
    }

    /// Configuration for the current conditions
    pub fn config(&self) -> PlaybackConfig {
        self.conditions().config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use streamview_domain::{MaxResolution, PreloadStrategy};

    use crate::infrastructure::platform::mock::create_mock_platform;

    #[test]
    fn initial_config_comes_from_current_observations() {
        let (platform, _handles) = create_mock_platform(NetworkTier::Poor, DeviceClass::Mobile);
        let env = PlaybackEnvironment::observe(&platform, |_| {});

        assert_eq!(
            env.conditions(),
            Conditions::new(NetworkTier::Poor, DeviceClass::Mobile)
        );
        assert_eq!(env.config().max_resolution, MaxResolution::P480);
        assert_eq!(env.config().preload, PreloadStrategy::Metadata);
    }

    #[test]
    fn tier_change_recomputes_config() {
        let (platform, handles) = create_mock_platform(NetworkTier::Good, DeviceClass::Desktop);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let env = PlaybackEnvironment::observe(&platform, move |c| sink.borrow_mut().push(c));

        assert_eq!(env.config().max_resolution, MaxResolution::P720);

        handles.connection.set_tier(NetworkTier::Excellent);
        handles.connection.set_tier(NetworkTier::Excellent);

        assert_eq!(env.config().max_resolution, MaxResolution::P1080);
        assert_eq!(
            *seen.borrow(),
            vec![Conditions::new(NetworkTier::Excellent, DeviceClass::Desktop)]
        );
    }

    #[test]
    fn resize_across_breakpoint_switches_preload() {
        let (platform, handles) = create_mock_platform(NetworkTier::Unknown, DeviceClass::Desktop);
        let env = PlaybackEnvironment::observe(&platform, |_| {});

        assert_eq!(env.config().max_resolution, MaxResolution::P1080);
        assert_eq!(env.config().preload, PreloadStrategy::Auto);

        handles.viewport.resize(400.0);

        assert_eq!(env.config().max_resolution, MaxResolution::P720);
        assert_eq!(env.config().preload, PreloadStrategy::Metadata);
    }

    #[test]
    fn dropping_environment_unsubscribes() {
        let (platform, handles) = create_mock_platform(NetworkTier::Unknown, DeviceClass::Desktop);
        let env = PlaybackEnvironment::observe(&platform, |_| {});

        assert_eq!(handles.connection.subscriber_count(), 1);
        assert_eq!(handles.viewport.subscriber_count(), 1);

        drop(env);

        assert_eq!(handles.connection.subscriber_count(), 0);
        assert_eq!(handles.viewport.subscriber_count(), 0);
    }
}
