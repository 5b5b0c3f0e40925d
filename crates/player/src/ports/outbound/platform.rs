//! Platform abstraction ports for environment observers and timers
//!
//! These traits abstract the execution environment so that:
//! 1. Application/presentation code remains platform-agnostic
//! 2. Browser and window APIs are isolated in infrastructure
//! 3. Tier/device changes and timer expiry can be simulated in tests
//!
//! Everything here is UI-thread confined, so no trait requires `Send`.
//! The `Platform` container that aggregates them lives in `crate::state`.

use std::{future::Future, pin::Pin, rc::Rc, time::Duration};

use streamview_domain::{DeviceClass, NetworkTier};

use super::PlatformError;

/// Boxed future that stays on the UI thread
pub type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

/// Opaque token returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Guard that unsubscribes an observer callback when dropped
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn connection(
        port: Rc<dyn ConnectionQualityPort>,
        callback: Rc<dyn Fn(NetworkTier)>,
    ) -> Self {
        let id = port.subscribe(callback);
        Self::new(move || port.unsubscribe(id))
    }

    pub fn viewport(port: Rc<dyn ViewportPort>, callback: Rc<dyn Fn(DeviceClass)>) -> Self {
        let id = port.subscribe(callback);
        Self::new(move || port.unsubscribe(id))
    }

    pub fn fullscreen(port: Rc<dyn FullscreenPort>, callback: Rc<dyn Fn(bool)>) -> Self {
        let id = port.subscribe(callback);
        Self::new(move || port.unsubscribe(id))
    }

    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Connection-quality observer (`navigator.connection` on the web)
///
/// Implementations must never fail: an environment without the API reports
/// `NetworkTier::Unknown` and simply never emits change events.
pub trait ConnectionQualityPort {
    /// Tier derived from the most recent observation
    fn current_tier(&self) -> NetworkTier;

    /// Register for tier changes. The callback receives the new tier.
    fn subscribe(&self, callback: Rc<dyn Fn(NetworkTier)>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// Viewport/device-class observer
pub trait ViewportPort {
    fn current_device_class(&self) -> DeviceClass;

    /// Register for device-class changes (only fired when the class flips,
    /// not on every resize)
    fn subscribe(&self, callback: Rc<dyn Fn(DeviceClass)>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// Fullscreen-changed callback; aliased so `mockall::automock` can mock
/// `FullscreenPort` (it rejects a bare `dyn Fn` in argument position)
type FullscreenCallback = Rc<dyn Fn(bool)>;

/// Fullscreen controller
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait FullscreenPort {
    fn is_fullscreen(&self) -> bool;

    /// Ask the environment to show the element with `element_id` fullscreen
    fn request_fullscreen(&self, element_id: &str) -> LocalBoxFuture<Result<(), PlatformError>>;

    fn exit_fullscreen(&self) -> LocalBoxFuture<Result<(), PlatformError>>;

    /// Register for fullscreen-changed notifications (`true` = now fullscreen)
    fn subscribe(&self, callback: FullscreenCallback) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

/// Schedulable one-shot timer
pub trait TimerPort {
    /// Run `callback` once after `delay` unless the returned handle is
    /// cancelled or dropped first
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Handle to a pending timer.
///
/// Dropping the handle cancels the timer. A timer callback that wants to
/// discard its own handle after firing uses [`TimerHandle::disarm`].
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Clear the timer. Cancelling a timer that already fired is a no-op.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Release the handle without cancelling (the timer has already fired)
    pub fn disarm(mut self) {
        self.cancel = None;
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}
