//! In-memory platform adapters for tests and headless runs
//!
//! `ManualTimer` is a fake clock: timers only fire when the test calls
//! [`ManualTimer::advance`]. The observer fakes let tests push tier, device
//! and fullscreen changes as if the environment had reported them.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures_util::future;
use streamview_domain::{DeviceClass, NetworkTier};

use crate::infrastructure::messaging::ListenerRegistry;
use crate::ports::outbound::{
    ConnectionQualityPort, FullscreenPort, LocalBoxFuture, PlatformError, SubscriptionId,
    TimerHandle, TimerPort, ViewportPort,
};
use crate::state::Platform;

// =============================================================================
// Timer
// =============================================================================

struct PendingTimer {
    deadline: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<u64, PendingTimer>,
}

/// Deterministic timer driven by explicit clock advancement
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the fake clock
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of scheduled timers that have neither fired nor been cancelled
    pub fn pending_count(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move the clock forward, firing due timers in deadline order.
    ///
    /// Callbacks run with the clock set to their own deadline and may
    /// schedule or cancel other timers.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;

        loop {
            let due = {
                let mut clock = self.clock.borrow_mut();
                let next = clock
                    .pending
                    .iter()
                    .filter(|(_, t)| t.deadline <= target)
                    .min_by_key(|(id, t)| (t.deadline, **id))
                    .map(|(id, _)| *id);
                match next.and_then(|id| clock.pending.remove(&id)) {
                    Some(timer) => {
                        clock.now = timer.deadline;
                        timer.callback
                    }
                    None => break,
                }
            };
            due();
        }

        self.clock.borrow_mut().now = target;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl TimerPort for ManualTimer {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let id = {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let deadline = clock.now + delay;
            clock.pending.insert(id, PendingTimer { deadline, callback });
            id
        };

        let clock: Weak<RefCell<ManualClock>> = Rc::downgrade(&self.clock);
        TimerHandle::new(move || {
            if let Some(clock) = clock.upgrade() {
                clock.borrow_mut().pending.remove(&id);
            }
        })
    }
}

// =============================================================================
// Observers
// =============================================================================

/// Connection-quality fake; `set_tier` behaves like a `change` event
#[derive(Clone, Default)]
pub struct FakeConnectionQuality {
    tier: Rc<Cell<NetworkTier>>,
    listeners: Rc<ListenerRegistry<NetworkTier>>,
}

impl FakeConnectionQuality {
    pub fn new(tier: NetworkTier) -> Self {
        Self {
            tier: Rc::new(Cell::new(tier)),
            listeners: Rc::new(ListenerRegistry::new()),
        }
    }

    pub fn set_tier(&self, tier: NetworkTier) {
        self.tier.set(tier);
        self.listeners.dispatch(tier);
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.subscriber_count()
    }
}

impl ConnectionQualityPort for FakeConnectionQuality {
    fn current_tier(&self) -> NetworkTier {
        self.tier.get()
    }

    fn subscribe(&self, callback: Rc<dyn Fn(NetworkTier)>) -> SubscriptionId {
        self.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }
}

/// Viewport fake; only dispatches when the class actually changes
#[derive(Clone, Default)]
pub struct FakeViewport {
    device: Rc<Cell<DeviceClass>>,
    listeners: Rc<ListenerRegistry<DeviceClass>>,
}

impl FakeViewport {
    pub fn new(device: DeviceClass) -> Self {
        Self {
            device: Rc::new(Cell::new(device)),
            listeners: Rc::new(ListenerRegistry::new()),
        }
    }

    /// Simulate a resize to `width` logical px
    pub fn resize(&self, width: f64) {
        let device = DeviceClass::from_viewport_width(width);
        if self.device.replace(device) != device {
            self.listeners.dispatch(device);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.subscriber_count()
    }
}

impl ViewportPort for FakeViewport {
    fn current_device_class(&self) -> DeviceClass {
        self.device.get()
    }

    fn subscribe(&self, callback: Rc<dyn Fn(DeviceClass)>) -> SubscriptionId {
        self.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }
}

/// Fullscreen fake that records requests and can be told to reject them
#[derive(Clone, Default)]
pub struct FakeFullscreen {
    active: Rc<Cell<bool>>,
    reject_with: Rc<RefCell<Option<String>>>,
    requests: Rc<RefCell<Vec<String>>>,
    exits: Rc<Cell<usize>>,
    listeners: Rc<ListenerRegistry<bool>>,
}

impl FakeFullscreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent request/exit fail with `reason`
    pub fn reject_with(&self, reason: impl Into<String>) {
        *self.reject_with.borrow_mut() = Some(reason.into());
    }

    /// Element ids passed to `request_fullscreen`, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn exit_count(&self) -> usize {
        self.exits.get()
    }

    fn transition(&self, to: bool) -> Result<(), PlatformError> {
        if let Some(reason) = self.reject_with.borrow().clone() {
            return Err(PlatformError::fullscreen(reason));
        }
        if self.active.replace(to) != to {
            self.listeners.dispatch(to);
        }
        Ok(())
    }
}

impl FullscreenPort for FakeFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.active.get()
    }

    fn request_fullscreen(&self, element_id: &str) -> LocalBoxFuture<Result<(), PlatformError>> {
        self.requests.borrow_mut().push(element_id.to_string());
        Box::pin(future::ready(self.transition(true)))
    }

    fn exit_fullscreen(&self) -> LocalBoxFuture<Result<(), PlatformError>> {
        self.exits.set(self.exits.get() + 1);
        Box::pin(future::ready(self.transition(false)))
    }

    fn subscribe(&self, callback: Rc<dyn Fn(bool)>) -> SubscriptionId {
        self.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }
}

/// Handles to the fakes behind a mock [`Platform`]
#[derive(Clone, Default)]
pub struct MockPlatformHandles {
    pub connection: FakeConnectionQuality,
    pub viewport: FakeViewport,
    pub fullscreen: FakeFullscreen,
    pub timer: ManualTimer,
}

/// Create a platform backed entirely by fakes
pub fn create_mock_platform(
    tier: NetworkTier,
    device: DeviceClass,
) -> (Platform, MockPlatformHandles) {
    let handles = MockPlatformHandles {
        connection: FakeConnectionQuality::new(tier),
        viewport: FakeViewport::new(device),
        fullscreen: FakeFullscreen::new(),
        timer: ManualTimer::new(),
    };

    let platform = Platform::new(
        handles.connection.clone(),
        handles.viewport.clone(),
        handles.fullscreen.clone(),
        handles.timer.clone(),
    );

    (platform, handles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_timer_fires_only_when_due() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let _handle = timer.schedule(Duration::from_millis(300), Box::new(move || flag.set(true)));

        timer.advance_ms(299);
        assert!(!fired.get());
        assert_eq!(timer.pending_count(), 1);

        timer.advance_ms(1);
        assert!(fired.get());
        assert_eq!(timer.pending_count(), 0);
        assert_eq!(timer.now(), Duration::from_millis(300));
    }

    #[test]
    fn dropped_handle_cancels_timer() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        drop(timer.schedule(Duration::from_millis(10), Box::new(move || flag.set(true))));

        timer.advance_ms(50);
        assert!(!fired.get());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = timer.schedule(Duration::from_millis(10), Box::new(move || flag.set(true)));

        handle.cancel();
        timer.advance_ms(50);

        assert!(!fired.get());
        assert_eq!(timer.pending_count(), 0);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let timer = ManualTimer::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut handles = Vec::new();
        for (label, ms) in [("late", 30u64), ("early", 10), ("mid", 20)] {
            let sink = Rc::clone(&order);
            handles.push(timer.schedule(
                Duration::from_millis(ms),
                Box::new(move || sink.borrow_mut().push(label)),
            ));
        }

        timer.advance_ms(100);
        assert_eq!(*order.borrow(), vec!["early", "mid", "late"]);
    }

    #[test]
    fn callback_may_schedule_follow_up_within_same_advance() {
        let timer = ManualTimer::new();
        let fired = Rc::new(Cell::new(0));

        let inner_timer = timer.clone();
        let counter = Rc::clone(&fired);
        let _outer = timer.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                counter.set(counter.get() + 1);
                let counter = Rc::clone(&counter);
                inner_timer
                    .schedule(
                        Duration::from_millis(10),
                        Box::new(move || counter.set(counter.get() + 1)),
                    )
                    .disarm();
            }),
        );

        timer.advance_ms(25);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn fake_viewport_dispatches_only_on_class_change() {
        let viewport = FakeViewport::new(DeviceClass::Desktop);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        viewport.subscribe(Rc::new(move |d| sink.borrow_mut().push(d)));

        viewport.resize(1200.0);
        viewport.resize(500.0);
        viewport.resize(400.0);

        assert_eq!(*changes.borrow(), vec![DeviceClass::Mobile]);
        assert_eq!(viewport.current_device_class(), DeviceClass::Mobile);
    }
}
