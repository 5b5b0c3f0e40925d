//! Desktop platform implementations
//!
//! The desktop webview exposes no Network Information API, so the tier is
//! static and seeded from the `PlayerConfig` override. The device class
//! follows the native window's logical width and is re-derived on every
//! resize unless the shell is pinned by config. Fullscreen drives the native
//! window and reports its live state, so leaving fullscreen through the OS
//! is observed too.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::core::Runtime;
use dioxus::desktop::tao::event::Event;
use dioxus::desktop::{
    DesktopContext, DesktopService, WeakDesktopContext, WindowEvent, WryEventHandler,
};
use dioxus::prelude::*;
use futures_util::future;
use streamview_domain::{DeviceClass, NetworkTier};

use crate::infrastructure::config::PlayerConfig;
use crate::infrastructure::messaging::ListenerRegistry;
use crate::ports::outbound::{
    ConnectionQualityPort, FullscreenPort, LocalBoxFuture, PlatformError, SubscriptionId,
    TimerHandle, TimerPort, ViewportPort,
};
use crate::state::Platform;

/// Native window operations the desktop adapters rely on
pub trait NativeWindow {
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&self, fullscreen: bool);
    /// Inner width in logical pixels
    fn logical_width(&self) -> f64;
}

/// Weak so the platform never keeps a closed window alive.
/// A dropped window reads as windowed with a non-finite width.
impl NativeWindow for WeakDesktopContext {
    fn is_fullscreen(&self) -> bool {
        self.upgrade()
            .is_some_and(|service| service.window.fullscreen().is_some())
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        if let Some(service) = self.upgrade() {
            DesktopService::set_fullscreen(&service, fullscreen);
        }
    }

    fn logical_width(&self) -> f64 {
        self.upgrade().map_or(f64::NAN, |service| {
            let scale = service.window.scale_factor();
            service.window.inner_size().to_logical::<f64>(scale).width
        })
    }
}

/// Window event handler registration, removed on drop
struct WindowResizeHook {
    window: WeakDesktopContext,
    handler: WryEventHandler,
}

impl WindowResizeHook {
    /// Run `on_resize` in the caller's Dioxus scope after every resize of `window`.
    ///
    /// Entering and leaving fullscreen resize the window as well.
    fn attach(window: &DesktopContext, on_resize: impl Fn() + 'static) -> Option<Self> {
        let runtime = Runtime::try_current()?;
        let scope = runtime.try_current_scope_id()?;

        let handler = window.create_wry_event_handler(move |event, _| {
            if let Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } = event
            {
                runtime.in_scope(scope, &on_resize);
            }
        });

        Some(Self {
            window: Rc::downgrade(window),
            handler,
        })
    }
}

impl Drop for WindowResizeHook {
    fn drop(&mut self) {
        if let Some(window) = self.window.upgrade() {
            window.remove_wry_event_handler(self.handler);
        }
    }
}

/// Connection quality on desktop: the configured override, or `Unknown`
#[derive(Default)]
pub struct DesktopConnectionQuality {
    tier: NetworkTier,
    listeners: ListenerRegistry<NetworkTier>,
}

impl DesktopConnectionQuality {
    pub fn new(tier_override: Option<NetworkTier>) -> Self {
        let tier = tier_override.unwrap_or_else(|| {
            tracing::debug!(
                "{}; using {}",
                PlatformError::UnsupportedObserver("connection quality"),
                NetworkTier::Unknown
            );
            NetworkTier::Unknown
        });
        Self {
            tier,
            listeners: ListenerRegistry::new(),
        }
    }
}

impl ConnectionQualityPort for DesktopConnectionQuality {
    fn current_tier(&self) -> NetworkTier {
        self.tier
    }

    fn subscribe(&self, callback: Rc<dyn Fn(NetworkTier)>) -> SubscriptionId {
        // Never dispatched: the desktop tier cannot change at runtime
        self.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }
}

struct ViewportState {
    device: Cell<DeviceClass>,
    window: Option<Rc<dyn NativeWindow>>,
    listeners: ListenerRegistry<DeviceClass>,
}

impl ViewportState {
    fn refresh(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let next = DeviceClass::from_viewport_width(window.logical_width());
        if self.device.replace(next) != next {
            tracing::debug!("Window resized into the {} layout", next);
            self.listeners.dispatch(next);
        }
    }
}

/// Viewport on desktop: the window's width class, or the configured shell
pub struct DesktopViewport {
    state: Rc<ViewportState>,
    _resize: Option<WindowResizeHook>,
}

impl DesktopViewport {
    /// Always `device`; resizes are ignored
    pub fn pinned(device: DeviceClass) -> Self {
        Self::from_state(device, None)
    }

    /// Derived from the window's logical width. Call [`refresh`](Self::refresh)
    /// after the window resizes.
    pub fn tracking(window: Rc<dyn NativeWindow>) -> Self {
        let device = DeviceClass::from_viewport_width(window.logical_width());
        Self::from_state(device, Some(window))
    }

    fn from_state(device: DeviceClass, window: Option<Rc<dyn NativeWindow>>) -> Self {
        Self {
            state: Rc::new(ViewportState {
                device: Cell::new(device),
                window,
                listeners: ListenerRegistry::new(),
            }),
            _resize: None,
        }
    }

    /// Re-read the window width; subscribers hear only class changes
    pub fn refresh(&self) {
        self.state.refresh();
    }

    fn refresh_on_resize(mut self, window: &DesktopContext) -> Self {
        if self.state.window.is_some() {
            let state = Rc::clone(&self.state);
            self._resize = WindowResizeHook::attach(window, move || state.refresh());
        }
        self
    }
}

impl ViewportPort for DesktopViewport {
    fn current_device_class(&self) -> DeviceClass {
        self.state.device.get()
    }

    fn subscribe(&self, callback: Rc<dyn Fn(DeviceClass)>) -> SubscriptionId {
        self.state.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.state.listeners.unsubscribe(id);
    }
}

struct FullscreenState {
    window: Option<Rc<dyn NativeWindow>>,
    /// Last state reported to subscribers
    reported: Cell<bool>,
    listeners: ListenerRegistry<bool>,
}

impl FullscreenState {
    fn live(&self) -> bool {
        self.window.as_ref().is_some_and(|window| window.is_fullscreen())
    }

    fn refresh(&self) {
        let live = self.live();
        if self.reported.replace(live) != live {
            self.listeners.dispatch(live);
        }
    }
}

/// Fullscreen on desktop toggles the whole native window.
///
/// The element id is ignored: the webview fills the window, so the window
/// going fullscreen is what the viewer sees.
pub struct DesktopFullscreen {
    state: Rc<FullscreenState>,
    _resize: Option<WindowResizeHook>,
}

impl DesktopFullscreen {
    pub fn new(window: Option<Rc<dyn NativeWindow>>) -> Self {
        let reported = window.as_ref().is_some_and(|window| window.is_fullscreen());
        Self {
            state: Rc::new(FullscreenState {
                window,
                reported: Cell::new(reported),
                listeners: ListenerRegistry::new(),
            }),
            _resize: None,
        }
    }

    /// Report the live window state to subscribers if it changed
    pub fn refresh(&self) {
        self.state.refresh();
    }

    fn refresh_on_resize(mut self, window: &DesktopContext) -> Self {
        let state = Rc::clone(&self.state);
        self._resize = WindowResizeHook::attach(window, move || state.refresh());
        self
    }

    fn set_window_fullscreen(&self, fullscreen: bool) -> Result<(), PlatformError> {
        let window = self
            .state
            .window
            .as_ref()
            .ok_or_else(|| PlatformError::fullscreen("no desktop window in context"))?;
        window.set_fullscreen(fullscreen);
        self.refresh();
        Ok(())
    }
}

impl FullscreenPort for DesktopFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.state.live()
    }

    fn request_fullscreen(&self, _element_id: &str) -> LocalBoxFuture<Result<(), PlatformError>> {
        Box::pin(future::ready(self.set_window_fullscreen(true)))
    }

    fn exit_fullscreen(&self) -> LocalBoxFuture<Result<(), PlatformError>> {
        Box::pin(future::ready(self.set_window_fullscreen(false)))
    }

    fn subscribe(&self, callback: Rc<dyn Fn(bool)>) -> SubscriptionId {
        self.state.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.state.listeners.unsubscribe(id);
    }
}

/// Desktop timer using a Dioxus task and the tokio clock.
///
/// Tasks are owned by the scope that scheduled them, so unmounting the
/// component also drops any timer still pending.
#[derive(Clone, Default)]
pub struct DesktopTimer;

impl TimerPort for DesktopTimer {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let task = spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        TimerHandle::new(move || task.cancel())
    }
}

/// Create platform services for desktop.
///
/// Must run inside the Dioxus tree so the window and scope are available.
pub fn create_platform(config: &PlayerConfig) -> Platform {
    let context = try_consume_context::<DesktopContext>();
    if context.is_none() {
        tracing::warn!("No desktop window in context; viewport and fullscreen are inert");
    }
    let native = context
        .as_ref()
        .map(|window| Rc::new(Rc::downgrade(window)) as Rc<dyn NativeWindow>);

    let mut viewport = match (config.device_override, &native) {
        (Some(device), _) => DesktopViewport::pinned(device),
        (None, Some(window)) => DesktopViewport::tracking(Rc::clone(window)),
        (None, None) => DesktopViewport::pinned(DeviceClass::default()),
    };
    let mut fullscreen = DesktopFullscreen::new(native);
    if let Some(window) = &context {
        viewport = viewport.refresh_on_resize(window);
        fullscreen = fullscreen.refresh_on_resize(window);
    }

    Platform::new(
        DesktopConnectionQuality::new(config.tier_override),
        viewport,
        fullscreen,
        DesktopTimer,
    )
}
