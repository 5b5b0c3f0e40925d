mod playback_session;

pub use playback_session::{
    EmbedEvent, PlaybackSession, PlayerLifecycleEvent, SessionNotification, SURFACE_TAP,
};
