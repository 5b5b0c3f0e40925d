//! Pointer gesture recognition

mod double_tap;

pub use double_tap::{DoubleTapDetector, GesturePhase, TapOutcome, DOUBLE_TAP_WINDOW};
