//! WASM platform implementations using web-sys
//!
//! - connection quality: `navigator.connection.effectiveType` + `change`
//! - viewport: `window.innerWidth` + `resize`
//! - fullscreen: `Element.requestFullscreen()` / `Document.exitFullscreen()`
//!   promises + `fullscreenchange`
//! - timer: `gloo_timers::callback::Timeout`
//!
//! `navigator.connection` is not in every browser (and not in web-sys'
//! stable API), so it is read through `js_sys::Reflect`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use js_sys::{Function, Promise, Reflect};
use streamview_domain::{DeviceClass, NetworkTier};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::EventTarget;

use crate::infrastructure::config::PlayerConfig;
use crate::infrastructure::messaging::ListenerRegistry;
use crate::ports::outbound::{
    ConnectionQualityPort, FullscreenPort, LocalBoxFuture, PlatformError, SubscriptionId,
    TimerHandle, TimerPort, ViewportPort,
};
use crate::state::Platform;

/// An event listener that is removed when dropped
struct DomListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
}

impl DomListener {
    fn attach(target: EventTarget, event: &'static str, handler: impl FnMut() + 'static) -> Option<Self> {
        let closure = Closure::<dyn FnMut()>::new(handler);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target,
                event,
                closure,
            }),
            Err(e) => {
                tracing::warn!("Failed to listen for {}: {:?}", event, e);
                None
            }
        }
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn js_error_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

// =============================================================================
// Connection quality
// =============================================================================

fn network_connection() -> Option<JsValue> {
    let navigator = web_sys::window()?.navigator();
    Reflect::get(&navigator, &JsValue::from_str("connection"))
        .ok()
        .filter(|c| !c.is_undefined() && !c.is_null())
}

fn read_tier(connection: &JsValue) -> NetworkTier {
    let effective_type = Reflect::get(connection, &JsValue::from_str("effectiveType"))
        .ok()
        .and_then(|v| v.as_string());
    NetworkTier::from_effective_type(effective_type.as_deref())
}

/// Connection quality from the Network Information API
pub struct WasmConnectionQuality {
    tier: Rc<Cell<NetworkTier>>,
    listeners: Rc<ListenerRegistry<NetworkTier>>,
    _change: Option<DomListener>,
}

impl WasmConnectionQuality {
    pub fn new() -> Self {
        let tier = Rc::new(Cell::new(NetworkTier::Unknown));
        let listeners = Rc::new(ListenerRegistry::new());

        let change = match network_connection() {
            Some(connection) => {
                tier.set(read_tier(&connection));
                let target: EventTarget = connection.clone().unchecked_into();
                let (tier, listeners) = (Rc::clone(&tier), Rc::clone(&listeners));
                DomListener::attach(target, "change", move || {
                    let next = read_tier(&connection);
                    if tier.replace(next) != next {
                        tracing::debug!("Network tier changed to {}", next);
                        listeners.dispatch(next);
                    }
                })
            }
            None => {
                tracing::debug!(
                    "{}; using {}",
                    PlatformError::UnsupportedObserver("connection quality"),
                    NetworkTier::Unknown
                );
                None
            }
        };

        Self {
            tier,
            listeners,
            _change: change,
        }
    }
}

impl Default for WasmConnectionQuality {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionQualityPort for WasmConnectionQuality {
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

// =============================================================================
// Viewport
// =============================================================================

fn read_device_class() -> DeviceClass {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0);
    DeviceClass::from_viewport_width(width)
}

/// Device class from the window width, re-evaluated on `resize`
pub struct WasmViewport {
    device: Rc<Cell<DeviceClass>>,
    listeners: Rc<ListenerRegistry<DeviceClass>>,
    _resize: Option<DomListener>,
}

impl WasmViewport {
    pub fn new() -> Self {
        let device = Rc::new(Cell::new(read_device_class()));
        let listeners = Rc::new(ListenerRegistry::new());

        let resize = web_sys::window().and_then(|window| {
            let (device, listeners) = (Rc::clone(&device), Rc::clone(&listeners));
            DomListener::attach(window.into(), "resize", move || {
                let next = read_device_class();
                if device.replace(next) != next {
                    listeners.dispatch(next);
                }
            })
        });

        Self {
            device,
            listeners,
            _resize: resize,
        }
    }
}

impl Default for WasmViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportPort for WasmViewport {
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

// =============================================================================
// Fullscreen
// =============================================================================

/// Call a promise-returning method by name, e.g. `el.requestFullscreen()`.
///
/// Old engines return `undefined` instead of a promise; that counts as success.
async fn call_fullscreen_method(target: JsValue, method: &str) -> Result<(), PlatformError> {
    let func = Reflect::get(&target, &JsValue::from_str(method))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| PlatformError::fullscreen(format!("{} is not supported", method)))?;

    let result = func
        .call0(&target)
        .map_err(|e| PlatformError::fullscreen(js_error_message(&e)))?;

    if let Ok(promise) = result.dyn_into::<Promise>() {
        JsFuture::from(promise)
            .await
            .map_err(|e| PlatformError::fullscreen(js_error_message(&e)))?;
    }
    Ok(())
}

/// Fullscreen API on `document`
pub struct WasmFullscreen {
    listeners: Rc<ListenerRegistry<bool>>,
    _change: Option<DomListener>,
}

impl WasmFullscreen {
    pub fn new() -> Self {
        let listeners = Rc::new(ListenerRegistry::new());
        let change = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|document| {
                let listeners = Rc::clone(&listeners);
                let doc = document.clone();
                DomListener::attach(document.into(), "fullscreenchange", move || {
                    listeners.dispatch(doc.fullscreen_element().is_some());
                })
            });

        Self {
            listeners,
            _change: change,
        }
    }
}

impl Default for WasmFullscreen {
    fn default() -> Self {
        Self::new()
    }
}

impl FullscreenPort for WasmFullscreen {
    fn is_fullscreen(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.fullscreen_element())
            .is_some()
    }

    fn request_fullscreen(&self, element_id: &str) -> LocalBoxFuture<Result<(), PlatformError>> {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id));
        let element_id = element_id.to_string();

        Box::pin(async move {
            let element = element
                .ok_or_else(|| PlatformError::fullscreen(format!("no element #{}", element_id)))?;
            call_fullscreen_method(element.into(), "requestFullscreen").await
        })
    }

    fn exit_fullscreen(&self) -> LocalBoxFuture<Result<(), PlatformError>> {
        let document = web_sys::window().and_then(|w| w.document());

        Box::pin(async move {
            let document =
                document.ok_or_else(|| PlatformError::fullscreen("no document available"))?;
            call_fullscreen_method(document.into(), "exitFullscreen").await
        })
    }

    fn subscribe(&self, callback: Rc<dyn Fn(bool)>) -> SubscriptionId {
        self.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }
}

// =============================================================================
// Timer
// =============================================================================

/// `setTimeout`-backed timer
#[derive(Clone, Default)]
pub struct WasmTimer;

impl TimerPort for WasmTimer {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, callback);
        TimerHandle::new(move || {
            timeout.cancel();
        })
    }
}

/// Create platform services for the browser
pub fn create_platform(_config: &PlayerConfig) -> Platform {
    Platform::new(
        WasmConnectionQuality::new(),
        WasmViewport::new(),
        WasmFullscreen::new(),
        WasmTimer,
    )
}
