use thiserror::Error;

/// Failures reported by platform adapters.
///
/// None of these reach the viewer: callers log them and carry on with a
/// conservative default.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The environment rejected or does not support a fullscreen transition
    #[error("Fullscreen request failed: {0}")]
    FullscreenRequestFailed(String),

    /// A connection-quality or viewport observer is not available
    #[error("Observer unsupported: {0}")]
    UnsupportedObserver(&'static str),
}

impl PlatformError {
    pub fn fullscreen(reason: impl Into<String>) -> Self {
        Self::FullscreenRequestFailed(reason.into())
    }
}
