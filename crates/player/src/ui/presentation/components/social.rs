//! Social controls shown alongside a video: like, follow and counts

use dioxus::prelude::*;
use streamview_domain::{format_compact_count, Creator};

/// Like button with a hover tooltip
#[component]
pub fn LikeButton(liked: bool, count: u64, on_toggle: EventHandler<()>) -> Element {
    let mut show_tooltip = use_signal(|| false);
    let tooltip = if liked { "Unlike" } else { "Like" };
    let heart = if liked { "♥" } else { "♡" };
    let count_label = format_compact_count(count);

    rsx! {
        div {
            class: "sv-like",
            onmouseenter: move |_| show_tooltip.set(true),
            onmouseleave: move |_| show_tooltip.set(false),

            button {
                class: if liked { "sv-like-button sv-like-button-active" } else { "sv-like-button" },
                "aria-pressed": "{liked}",
                "aria-label": tooltip,
                onclick: move |e| {
                    e.stop_propagation();
                    on_toggle.call(());
                },
                span { "{heart}" }
                span { class: "sv-count", "{count_label}" }
            }

            if show_tooltip() {
                div {
                    class: "sv-tooltip",
                    role: "tooltip",
                    "{tooltip}"
                }
            }
        }
    }
}

/// Creator avatar, name and follow toggle
#[component]
pub fn CreatorBar(
    creator: Creator,
    following: bool,
    on_toggle_follow: EventHandler<()>,
) -> Element {
    let label = if following { "Following" } else { "Follow" };
    let name = creator.display_name().to_string();

    rsx! {
        div {
            class: "sv-creator",
            {
                match creator.avatar_url() {
                    Some(url) => rsx! {
                        img { class: "sv-avatar", src: "{url}", alt: "{name}" }
                    },
                    None => rsx! {
                        span { class: "sv-avatar sv-avatar-initial", {creator.initial()} }
                    },
                }
            }
            span { class: "sv-creator-name", "{name}" }
            button {
                class: if following { "sv-follow sv-follow-active" } else { "sv-follow" },
                onclick: move |_| on_toggle_follow.call(()),
                "{label}"
            }
        }
    }
}

/// Compact views count, hidden when unknown
#[component]
pub fn ViewCount(views: Option<u64>) -> Element {
    let Some(views) = views else {
        return rsx! {};
    };
    let noun = if views == 1 { "view" } else { "views" };
    let count = format_compact_count(views);

    rsx! {
        span { class: "sv-count sv-views", "{count} {noun}" }
    }
}
