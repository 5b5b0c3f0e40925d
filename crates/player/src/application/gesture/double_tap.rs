//! Double-tap gesture detection
//!
//! Two states: `Idle` and `ArmedWaiting`. The first tap arms a timer for
//! [`DOUBLE_TAP_WINDOW`]; a second tap before it fires completes a double
//! tap and returns to `Idle`. If the timer fires first the detector returns
//! to `Idle` silently. Pairing is greedy: with three quick taps the first two
//! pair and the third arms a new cycle.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::ports::outbound::{TimerHandle, TimerPort};

/// Maximum gap between the two taps of a double tap
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Result of feeding one tap to the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// First tap of a potential pair; waiting for a second
    Armed,
    /// Second tap arrived in time
    DoubleTap,
}

/// Observable detector phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    ArmedWaiting,
}

enum GestureState {
    Idle,
    ArmedWaiting { generation: u64, timer: TimerHandle },
}

/// Double-tap detector holding at most one pending timer
pub struct DoubleTapDetector {
    timer: Rc<dyn TimerPort>,
    window: Duration,
    state: Rc<RefCell<GestureState>>,
    generation: Cell<u64>,
}

impl DoubleTapDetector {
    pub fn new(timer: Rc<dyn TimerPort>) -> Self {
        Self::with_window(timer, DOUBLE_TAP_WINDOW)
    }

    pub fn with_window(timer: Rc<dyn TimerPort>, window: Duration) -> Self {
        Self {
            timer,
            window,
            state: Rc::new(RefCell::new(GestureState::Idle)),
            generation: Cell::new(0),
        }
    }

    pub fn phase(&self) -> GesturePhase {
        match *self.state.borrow() {
            GestureState::Idle => GesturePhase::Idle,
            GestureState::ArmedWaiting { .. } => GesturePhase::ArmedWaiting,
        }
    }

    /// Feed a tap. `DoubleTap` is returned synchronously for the second tap.
    pub fn on_tap(&self) -> TapOutcome {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), GestureState::Idle);

        match previous {
            GestureState::ArmedWaiting { timer, .. } => {
                timer.cancel();
                TapOutcome::DoubleTap
            }
            GestureState::Idle => {
                self.arm();
                TapOutcome::Armed
            }
        }
    }

    /// Drop back to `Idle`, cancelling any pending timer
    pub fn reset(&self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), GestureState::Idle);
        if let GestureState::ArmedWaiting { timer, .. } = previous {
            timer.cancel();
        }
    }

    fn arm(&self) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let state: Weak<RefCell<GestureState>> = Rc::downgrade(&self.state);
        let timer = self.timer.schedule(
            self.window,
            Box::new(move || expire(&state, generation)),
        );

        *self.state.borrow_mut() = GestureState::ArmedWaiting { generation, timer };
    }
}

/// Timer callback: return to `Idle` unless a newer cycle has started
fn expire(state: &Weak<RefCell<GestureState>>, generation: u64) {
    let Some(cell) = state.upgrade() else {
        return;
    };

    let mut state = cell.borrow_mut();
    let current = matches!(
        *state,
        GestureState::ArmedWaiting { generation: g, .. } if g == generation
    );
    if current {
        if let GestureState::ArmedWaiting { timer, .. } =
            std::mem::replace(&mut *state, GestureState::Idle)
        {
            timer.disarm();
        }
    }
}

impl std::fmt::Debug for DoubleTapDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoubleTapDetector")
            .field("window", &self.window)
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::ManualTimer;

    fn detector() -> (DoubleTapDetector, ManualTimer) {
        let clock = ManualTimer::new();
        let detector = DoubleTapDetector::new(Rc::new(clock.clone()));
        (detector, clock)
    }

    #[test]
    fn single_tap_expires_silently() {
        let (detector, clock) = detector();

        assert_eq!(detector.on_tap(), TapOutcome::Armed);
        assert_eq!(detector.phase(), GesturePhase::ArmedWaiting);
        assert_eq!(clock.pending_count(), 1);

        clock.advance_ms(299);
        assert_eq!(detector.phase(), GesturePhase::ArmedWaiting);

        clock.advance_ms(1);
        assert_eq!(detector.phase(), GesturePhase::Idle);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn two_taps_within_window_emit_double_tap() {
        let (detector, clock) = detector();

        detector.on_tap();
        clock.advance_ms(150);
        assert_eq!(detector.on_tap(), TapOutcome::DoubleTap);

        assert_eq!(detector.phase(), GesturePhase::Idle);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn three_rapid_taps_emit_exactly_one_double_tap() {
        let (detector, clock) = detector();

        let outcomes: Vec<_> = (0..3)
            .map(|_| {
                clock.advance_ms(50);
                detector.on_tap()
            })
            .collect();

        assert_eq!(
            outcomes,
            vec![TapOutcome::Armed, TapOutcome::DoubleTap, TapOutcome::Armed]
        );
        assert_eq!(detector.phase(), GesturePhase::ArmedWaiting);

        clock.advance_ms(300);
        assert_eq!(detector.phase(), GesturePhase::Idle);
    }

    #[test]
    fn tap_after_window_starts_a_new_cycle() {
        let (detector, clock) = detector();

        detector.on_tap();
        clock.advance_ms(301);
        assert_eq!(detector.on_tap(), TapOutcome::Armed);
        assert_eq!(clock.pending_count(), 1);
    }

    #[test]
    fn reset_cancels_pending_timer() {
        let (detector, clock) = detector();

        detector.on_tap();
        detector.reset();

        assert_eq!(detector.phase(), GesturePhase::Idle);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn dropping_detector_releases_pending_timer() {
        let (detector, clock) = detector();

        detector.on_tap();
        assert_eq!(clock.pending_count(), 1);

        drop(detector);
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn custom_window_is_respected() {
        let clock = ManualTimer::new();
        let detector =
            DoubleTapDetector::with_window(Rc::new(clock.clone()), Duration::from_millis(100));

        detector.on_tap();
        clock.advance_ms(120);
        assert_eq!(detector.on_tap(), TapOutcome::Armed);
    }
}
