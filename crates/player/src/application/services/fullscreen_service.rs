//! Fullscreen toggling for the player container

use std::rc::Rc;

use crate::application::gesture::{DoubleTapDetector, TapOutcome};
use crate::ports::outbound::{FullscreenPort, LocalBoxFuture, Subscription};
use crate::state::Platform;

/// What a toggle attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenToggle {
    Entered,
    Exited,
    /// The environment refused; already logged
    Failed,
}

/// Enter fullscreen on `element_id` if not fullscreen, otherwise exit.
///
/// Failures are logged and swallowed.
pub async fn toggle_fullscreen(port: &dyn FullscreenPort, element_id: &str) -> FullscreenToggle {
    if port.is_fullscreen() {
        match port.exit_fullscreen().await {
            Ok(()) => FullscreenToggle::Exited,
            Err(e) => {
                tracing::warn!("Could not exit fullscreen: {}", e);
                FullscreenToggle::Failed
            }
        }
    } else {
        match port.request_fullscreen(element_id).await {
            Ok(()) => FullscreenToggle::Entered,
            Err(e) => {
                tracing::warn!("Could not enter fullscreen on #{}: {}", element_id, e);
                FullscreenToggle::Failed
            }
        }
    }
}

/// Double tap on a player surface toggles fullscreen on its container.
///
/// Each completed double tap yields exactly one toggle attempt; the caller
/// drives the returned future on its executor.
pub struct DoubleTapFullscreen {
    detector: DoubleTapDetector,
    fullscreen: Rc<dyn FullscreenPort>,
    element_id: String,
}

impl DoubleTapFullscreen {
    pub fn new(platform: &Platform, element_id: impl Into<String>) -> Self {
        Self {
            detector: DoubleTapDetector::new(platform.timer()),
            fullscreen: platform.fullscreen(),
            element_id: element_id.into(),
        }
    }

    /// Feed a surface tap; returns the toggle to run when a double tap completes
    pub fn on_tap(&self) -> Option<LocalBoxFuture<FullscreenToggle>> {
        match self.detector.on_tap() {
            TapOutcome::Armed => None,
            TapOutcome::DoubleTap => {
                let fullscreen = Rc::clone(&self.fullscreen);
                let element_id = self.element_id.clone();
                Some(Box::pin(async move {
                    toggle_fullscreen(fullscreen.as_ref(), &element_id).await
                }))
            }
        }
    }

    /// Observe fullscreen changes until the returned guard is dropped
    pub fn watch(&self, on_change: impl Fn(bool) + 'static) -> Subscription {
        Subscription::fullscreen(Rc::clone(&self.fullscreen), Rc::new(on_change))
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    /// Abandon a half-finished double tap
    pub fn reset(&self) {
        self.detector.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::infrastructure::platform::mock::{create_mock_platform, FakeFullscreen};
    use crate::ports::outbound::{MockFullscreenPort, PlatformError};
    use futures_util::future;
    use mockall::predicate::eq;
    use streamview_domain::{DeviceClass, NetworkTier};

    #[tokio::test]
    async fn requests_fullscreen_when_windowed() {
        let mut port = MockFullscreenPort::new();
        port.expect_is_fullscreen().return_const(false);
        port.expect_request_fullscreen()
            .with(eq("player-v1"))
            .times(1)
            .returning(|_| Box::pin(future::ready(Ok(()))));
        port.expect_exit_fullscreen().never();

        assert_eq!(
            toggle_fullscreen(&port, "player-v1").await,
            FullscreenToggle::Entered
        );
    }

    #[tokio::test]
    async fn exits_when_already_fullscreen() {
        let mut port = MockFullscreenPort::new();
        port.expect_is_fullscreen().return_const(true);
        port.expect_request_fullscreen().never();
        port.expect_exit_fullscreen()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(()))));

        assert_eq!(
            toggle_fullscreen(&port, "player-v1").await,
            FullscreenToggle::Exited
        );
    }

    #[tokio::test]
    async fn rejection_is_swallowed() {
        let mut port = MockFullscreenPort::new();
        port.expect_is_fullscreen().return_const(false);
        port.expect_request_fullscreen().times(1).returning(|_| {
            Box::pin(future::ready(Err(PlatformError::fullscreen(
                "permission denied",
            ))))
        });

        assert_eq!(
            toggle_fullscreen(&port, "player-v1").await,
            FullscreenToggle::Failed
        );
    }

    #[tokio::test]
    async fn consecutive_toggles_alternate() {
        let fullscreen = FakeFullscreen::new();

        assert_eq!(
            toggle_fullscreen(&fullscreen, "player").await,
            FullscreenToggle::Entered
        );
        assert_eq!(
            toggle_fullscreen(&fullscreen, "player").await,
            FullscreenToggle::Exited
        );
        assert_eq!(fullscreen.requests(), vec!["player".to_string()]);
        assert_eq!(fullscreen.exit_count(), 1);
    }

    #[tokio::test]
    async fn fake_rejection_leaves_state_unchanged() {
        let fullscreen = FakeFullscreen::new();
        fullscreen.reject_with("not allowed");

        assert_eq!(
            toggle_fullscreen(&fullscreen, "player").await,
            FullscreenToggle::Failed
        );
        assert!(!fullscreen.is_fullscreen());
    }

    async fn run_taps(gesture: &DoubleTapFullscreen, taps: usize) -> Vec<FullscreenToggle> {
        let mut toggles = Vec::new();
        for _ in 0..taps {
            if let Some(toggle) = gesture.on_tap() {
                toggles.push(toggle.await);
            }
        }
        toggles
    }

    #[tokio::test]
    async fn three_rapid_taps_request_fullscreen_once() {
        let (platform, handles) = create_mock_platform(NetworkTier::Excellent, DeviceClass::Desktop);
        let gesture = DoubleTapFullscreen::new(&platform, "sv-player-v1");

        let toggles = run_taps(&gesture, 3).await;

        assert_eq!(toggles, vec![FullscreenToggle::Entered]);
        assert_eq!(handles.fullscreen.requests(), vec!["sv-player-v1".to_string()]);
        assert_eq!(handles.fullscreen.exit_count(), 0);
        // Third tap armed a new cycle
        assert_eq!(handles.timer.pending_count(), 1);
    }

    #[tokio::test]
    async fn second_double_tap_exits() {
        let (platform, handles) = create_mock_platform(NetworkTier::Excellent, DeviceClass::Desktop);
        let gesture = DoubleTapFullscreen::new(&platform, "sv-player-v1");

        let toggles = run_taps(&gesture, 4).await;

        assert_eq!(
            toggles,
            vec![FullscreenToggle::Entered, FullscreenToggle::Exited]
        );
        assert_eq!(handles.fullscreen.requests().len(), 1);
        assert_eq!(handles.fullscreen.exit_count(), 1);
    }

    #[tokio::test]
    async fn taps_split_by_the_window_do_nothing() {
        let (platform, handles) = create_mock_platform(NetworkTier::Excellent, DeviceClass::Desktop);
        let gesture = DoubleTapFullscreen::new(&platform, "sv-player-v1");

        assert!(gesture.on_tap().is_none());
        handles.timer.advance_ms(300);
        assert!(gesture.on_tap().is_none());

        assert!(handles.fullscreen.requests().is_empty());
    }

    #[tokio::test]
    async fn watch_reports_changes_until_dropped() {
        let (platform, _handles) = create_mock_platform(NetworkTier::Excellent, DeviceClass::Desktop);
        let gesture = DoubleTapFullscreen::new(&platform, "sv-player-v1");
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let subscription = gesture.watch(move |active| sink.borrow_mut().push(active));
        run_taps(&gesture, 2).await;
        assert!(gesture.is_fullscreen());
        drop(subscription);
        run_taps(&gesture, 2).await;

        assert_eq!(*seen.borrow(), vec![true]);
        assert!(!gesture.is_fullscreen());
    }
}
