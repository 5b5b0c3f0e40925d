//! Per-embed playback session
//!
//! A session lives from the moment the player embed mounts until it
//! unmounts. It turns raw embed lifecycle events into the notifications the
//! shell forwards to its callbacks. A view is tracked at most once per
//! session, no matter how many play/pause cycles follow.

use serde::Deserialize;

/// Event type the listener script posts for surface taps
pub const SURFACE_TAP: &str = "tap";

/// Lifecycle event reported by the embedded player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerLifecycleEvent {
    Play,
    Pause,
    DurationChange(f64),
    LoadedMetadata(f64),
}

/// Notification the shell should forward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionNotification {
    /// First play of this session
    ViewTracked,
    /// A usable media duration, in seconds
    DurationChanged(f64),
}

/// Event payload posted by the embed listener script
///
/// `{"type": "durationchange", "duration": 12.5}`, or `{"type": "tap"}` for
/// a click on the video surface outside the embed's own controls.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl EmbedEvent {
    /// A click on the video surface, not on a player control
    pub fn is_surface_tap(&self) -> bool {
        self.kind == SURFACE_TAP
    }

    /// Convert to a lifecycle event; unknown event types yield `None`
    pub fn into_lifecycle(self) -> Option<PlayerLifecycleEvent> {
        let duration = self.duration.unwrap_or(f64::NAN);
        match self.kind.as_str() {
            "play" => Some(PlayerLifecycleEvent::Play),
            "pause" => Some(PlayerLifecycleEvent::Pause),
            "durationchange" => Some(PlayerLifecycleEvent::DurationChange(duration)),
            "loadedmetadata" => Some(PlayerLifecycleEvent::LoadedMetadata(duration)),
            other => {
                tracing::trace!("Ignoring embed event {}", other);
                None
            }
        }
    }
}

/// State of one playback session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackSession {
    view_tracked: bool,
    is_playing: bool,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event, returning what (if anything) should be reported
    pub fn handle(&mut self, event: PlayerLifecycleEvent) -> Option<SessionNotification> {
        match event {
            PlayerLifecycleEvent::Play => {
                self.is_playing = true;
                if self.view_tracked {
                    None
                } else {
                    self.view_tracked = true;
                    Some(SessionNotification::ViewTracked)
                }
            }
            PlayerLifecycleEvent::Pause => {
                self.is_playing = false;
                None
            }
            PlayerLifecycleEvent::DurationChange(seconds)
            | PlayerLifecycleEvent::LoadedMetadata(seconds) => {
                if seconds.is_finite() && seconds > 0.0 {
                    Some(SessionNotification::DurationChanged(seconds))
                } else {
                    None
                }
            }
        }
    }

    pub fn view_tracked(&self) -> bool {
        self.view_tracked
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }
}
