//! Outbound ports - Interfaces for the execution environment
//!
//! These ports define the contracts that platform adapters must implement,
//! so application services and the presentation shell never touch browser or
//! window APIs directly and can be driven by fakes in tests.

pub mod error;
pub mod platform;

pub use error::PlatformError;
pub use platform::{
    ConnectionQualityPort, FullscreenPort, LocalBoxFuture, Subscription, SubscriptionId,
    TimerHandle, TimerPort, ViewportPort,
};

#[cfg(any(test, feature = "testing"))]
pub use platform::MockFullscreenPort;
