//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates all platform-specific adapters behind port traits.
//!
//! Usage:
//! - Created by `create_platform()` in platform/desktop.rs or platform/wasm.rs,
//!   or by `create_mock_platform()` in tests
//! - Provided to the Dioxus tree by `AppRoot`
//! - Accessed in UI via `use_platform()`

use std::rc::Rc;

use crate::ports::outbound::{ConnectionQualityPort, FullscreenPort, TimerPort, ViewportPort};

/// Unified platform services container
///
/// Cloning is cheap; every field is reference counted. The container is not
/// `Send` because the adapters hold browser handles.
#[derive(Clone)]
pub struct Platform {
    connection: Rc<dyn ConnectionQualityPort>,
    viewport: Rc<dyn ViewportPort>,
    fullscreen: Rc<dyn FullscreenPort>,
    timer: Rc<dyn TimerPort>,
}

impl Platform {
    pub fn new(
        connection: impl ConnectionQualityPort + 'static,
        viewport: impl ViewportPort + 'static,
        fullscreen: impl FullscreenPort + 'static,
        timer: impl TimerPort + 'static,
    ) -> Self {
        Self {
            connection: Rc::new(connection),
            viewport: Rc::new(viewport),
            fullscreen: Rc::new(fullscreen),
            timer: Rc::new(timer),
        }
    }

    pub fn connection(&self) -> Rc<dyn ConnectionQualityPort> {
        Rc::clone(&self.connection)
    }

    pub fn viewport(&self) -> Rc<dyn ViewportPort> {
        Rc::clone(&self.viewport)
    }

    pub fn fullscreen(&self) -> Rc<dyn FullscreenPort> {
        Rc::clone(&self.fullscreen)
    }

    pub fn timer(&self) -> Rc<dyn TimerPort> {
        Rc::clone(&self.timer)
    }
}
