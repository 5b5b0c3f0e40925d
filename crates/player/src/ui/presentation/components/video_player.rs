//! Video Player - host for the hosted `mux-player` embed
//!
//! Resolves the playback id, applies the playback configuration for the
//! current tier and device, forwards embed lifecycle events through a
//! [`PlaybackSession`] and toggles fullscreen on double tap.
//!
//! Taps are detected by the relay script rather than a Dioxus `onclick`:
//! clicks land on the embed host whatever shadow part was hit, and only the
//! composed path tells a control apart from the video surface.

use std::rc::Rc;

use dioxus::prelude::*;
use serde_json::Value;
use streamview_domain::ContentItem;

use crate::application::services::DoubleTapFullscreen;
use crate::application::session::{EmbedEvent, PlaybackSession, SessionNotification, SURFACE_TAP};
use crate::infrastructure::PlayerConfig;
use crate::presentation::hooks::use_playback_config;
use crate::use_platform;

const LIFECYCLE_EVENTS: [&str; 4] = ["play", "pause", "durationchange", "loadedmetadata"];

/// Script that relays the embed's media events and surface taps back over
/// the eval channel. Every interpolated value is a JSON literal.
fn listener_script(embed_id: &str) -> String {
    let target = Value::from(embed_id);
    let events = Value::from(LIFECYCLE_EVENTS.to_vec());
    let tap = Value::from(SURFACE_TAP);

    format!(
        r#"
        const isControl = (node) => node instanceof Element && (
            ["button", "input", "select"].includes(node.localName) ||
            ["button", "slider", "menu", "menuitem", "listbox", "option"].includes(node.getAttribute("role")) ||
            node.localName === "media-control-bar" ||
            node.localName.endsWith("-button") ||
            node.localName.endsWith("-range")
        );
        const attach = () => {{
            const el = document.getElementById({target});
            if (!el) {{ requestAnimationFrame(attach); return; }}
            for (const type of {events}) {{
                el.addEventListener(type, () => {{
                    const duration = Number.isFinite(el.duration) ? el.duration : null;
                    dioxus.send({{ type, duration }});
                }});
            }}
            el.addEventListener("click", (event) => {{
                if (!event.composedPath().some(isControl)) dioxus.send({{ type: {tap} }});
            }});
        }};
        attach();
        "#
    )
}

/// Props for VideoPlayer
#[derive(Props, Clone, PartialEq)]
pub struct VideoPlayerProps {
    pub item: ContentItem,
    /// Fired once per mount, on first play
    pub on_view_tracked: EventHandler<()>,
    /// Fired with every usable duration (seconds)
    pub on_duration_change: EventHandler<f64>,
}

/// Video Player component
#[component]
pub fn VideoPlayer(props: VideoPlayerProps) -> Element {
    let config = use_context::<PlayerConfig>();
    let platform = use_platform();
    let playback = use_playback_config();

    let playback_id = props.item.playback_id(&config.stream_hosts);
    let container_id = format!("sv-player-{}", props.item.id());
    let embed_id = format!("sv-embed-{}", props.item.id());

    let session = use_signal(PlaybackSession::new);
    let gesture = use_hook(|| Rc::new(DoubleTapFullscreen::new(&platform, container_id.clone())));
    {
        let gesture = Rc::clone(&gesture);
        use_drop(move || gesture.reset());
    }

    let fullscreen = use_signal(|| gesture.is_fullscreen());
    use_hook(|| {
        Rc::new(gesture.watch(move |active| {
            let mut fullscreen = fullscreen;
            fullscreen.set(active);
        }))
    });

    // Relay embed events for the lifetime of this component
    {
        let embed_id = embed_id.clone();
        let gesture = Rc::clone(&gesture);
        let playable = playback_id.is_ok();
        let on_view_tracked = props.on_view_tracked;
        let on_duration_change = props.on_duration_change;
        use_hook(move || {
            if playable {
                spawn(relay_embed_events(
                    embed_id,
                    session,
                    gesture,
                    on_view_tracked,
                    on_duration_change,
                ));
            }
        });
    }

    let playback_id = match playback_id {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("{}", e);
            return rsx! {
                div {
                    class: "sv-player sv-player-unplayable",
                    role: "alert",
                    "This video cannot be played."
                }
            };
        }
    };

    let is_playing = session.read().is_playing();
    let poster = props.item.thumbnail_url().to_string();
    let title = props.item.title().to_string();

    let class = if fullscreen() {
        "sv-player sv-player-fullscreen"
    } else {
        "sv-player"
    };

    rsx! {
        div {
            id: "{container_id}",
            class,

            mux-player {
                "id": "{embed_id}",
                "playback-id": "{playback_id}",
                "poster": "{poster}",
                "title": "{title}",
                "preload": playback.preload.as_attr(),
                "max-resolution": playback.max_resolution.as_attr(),
                "playsinline": true,
                "controls": true,
            }

            if is_playing {
                span {
                    class: "sv-playing-indicator",
                    "aria-label": "Playing",
                    "Playing"
                }
            }
        }
    }
}

async fn relay_embed_events(
    embed_id: String,
    mut session: Signal<PlaybackSession>,
    gesture: Rc<DoubleTapFullscreen>,
    on_view_tracked: EventHandler<()>,
    on_duration_change: EventHandler<f64>,
) {
    let mut eval = document::eval(&listener_script(&embed_id));

    loop {
        let event = match eval.recv::<EmbedEvent>().await {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!("Embed event channel for #{} closed: {:?}", embed_id, e);
                break;
            }
        };

        if event.is_surface_tap() {
            if let Some(toggle) = gesture.on_tap() {
                spawn(async move {
                    toggle.await;
                });
            }
            continue;
        }

        let Some(lifecycle) = event.into_lifecycle() else {
            continue;
        };

        let notification = session.write().handle(lifecycle);
        match notification {
            Some(SessionNotification::ViewTracked) => on_view_tracked.call(()),
            Some(SessionNotification::DurationChanged(seconds)) => on_duration_change.call(seconds),
            None => {}
        }
    }
}
