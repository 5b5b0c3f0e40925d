//! Video Modal - full video with creator and social metadata

use dioxus::prelude::*;
use streamview_domain::{format_duration, ContentItem};

use crate::presentation::components::social::{CreatorBar, LikeButton, ViewCount};
use crate::presentation::components::video_player::VideoPlayer;

/// Props for VideoModal
#[derive(Props, Clone, PartialEq)]
pub struct VideoModalProps {
    pub item: ContentItem,
    pub liked: bool,
    pub following: bool,
    /// Views including those tracked during this run
    #[props(default)]
    pub views: Option<u64>,
    /// Last duration the embed reported for this item, in seconds
    #[props(default)]
    pub duration: Option<f64>,
    pub on_close: EventHandler<()>,
    pub on_like: EventHandler<()>,
    pub on_follow: EventHandler<()>,
    pub on_view_tracked: EventHandler<()>,
    pub on_duration_change: EventHandler<f64>,
}

/// Video Modal component
#[component]
pub fn VideoModal(props: VideoModalProps) -> Element {
    let item = props.item.clone();
    // Stored count excludes the viewer's own like
    let like_count = if props.liked {
        item.like_count().saturating_add(1)
    } else {
        item.like_count()
    };
    let title = item.title().to_string();
    let item_key = item.id().to_string();
    let description = item.description().map(str::to_string);
    let duration = props.duration.and_then(format_duration);

    rsx! {
        div {
            class: "sv-modal-backdrop",
            onclick: move |_| props.on_close.call(()),

            div {
                class: "sv-modal",
                role: "dialog",
                "aria-modal": "true",
                "aria-label": "{title}",
                onclick: |e| e.stop_propagation(),

                // Header
                div {
                    class: "sv-modal-header",
                    h2 { class: "sv-modal-title", "{title}" }
                    button {
                        class: "sv-modal-close",
                        "aria-label": "Close",
                        onclick: move |_| props.on_close.call(()),
                        "×"
                    }
                }

                VideoPlayer {
                    key: "{item_key}",
                    item: item.clone(),
                    on_view_tracked: props.on_view_tracked,
                    on_duration_change: props.on_duration_change,
                }

                // Social
                div {
                    class: "sv-modal-meta",
                    CreatorBar {
                        creator: item.creator().clone(),
                        following: props.following,
                        on_toggle_follow: props.on_follow,
                    }
                    div {
                        class: "sv-modal-stats",
                        LikeButton {
                            liked: props.liked,
                            count: like_count,
                            on_toggle: props.on_like,
                        }
                        ViewCount { views: props.views }
                        if let Some(duration) = duration {
                            span { class: "sv-count sv-duration", "{duration}" }
                        }
                    }
                }

                if let Some(description) = description {
                    p { class: "sv-modal-description", "{description}" }
                }
            }
        }
    }
}
