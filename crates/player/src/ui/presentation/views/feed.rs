//! Feed View - thumbnail grid that opens videos in the modal

use dioxus::prelude::*;
use streamview_domain::{format_compact_count, ContentItem};

use crate::presentation::components::VideoModal;
use crate::presentation::state::use_feed_state;

/// Feed View component
#[component]
pub fn FeedView(items: Vec<ContentItem>) -> Element {
    let mut feed = use_feed_state();
    let selected = feed.selected.read().clone();

    rsx! {
        main {
            class: "sv-feed",

            if items.is_empty() {
                p { class: "sv-feed-empty", "Nothing to watch yet." }
            }

            div {
                class: "sv-feed-grid",
                for (key, item) in items.iter().map(|i| (i.id().to_string(), i.clone())) {
                    FeedCard {
                        key: "{key}",
                        liked: feed.is_liked(&key),
                        item,
                        on_open: move |item| feed.open(item),
                    }
                }
            }

            if let Some(item) = selected {
                {
                    let content_id = item.id().to_string();
                    let creator_id = item.creator().id().to_string();
                    let liked = feed.is_liked(&content_id);
                    let following = feed.is_following(&creator_id);
                    let views = feed.views_for(&item);
                    let duration = feed.duration_of(&content_id);

                    let like_id = content_id.clone();
                    let view_id = content_id.clone();
                    let duration_id = content_id;

                    rsx! {
                        VideoModal {
                            item,
                            liked,
                            following,
                            views,
                            duration,
                            on_close: move |_| feed.close(),
                            on_like: move |_| {
                                let now_liked = feed.toggle_like(&like_id);
                                tracing::debug!("Content {} liked: {}", like_id, now_liked);
                            },
                            on_follow: move |_| {
                                let now_following = feed.toggle_follow(&creator_id);
                                tracing::debug!("Creator {} followed: {}", creator_id, now_following);
                            },
                            on_view_tracked: move |_| {
                                tracing::info!("View tracked for {}", view_id);
                                feed.record_view(&view_id);
                            },
                            on_duration_change: move |seconds| feed.record_duration(&duration_id, seconds),
                        }
                    }
                }
            }
        }
    }
}

/// A single thumbnail tile
#[component]
fn FeedCard(item: ContentItem, liked: bool, on_open: EventHandler<ContentItem>) -> Element {
    let title = item.title().to_string();
    let thumbnail = item.thumbnail_url().to_string();
    let creator = item.creator().display_name().to_string();
    let likes = format_compact_count(item.like_count().saturating_add(u64::from(liked)));

    rsx! {
        button {
            class: "sv-card",
            onclick: move |_| on_open.call(item.clone()),
            img { class: "sv-card-thumb", src: "{thumbnail}", alt: "{title}", "loading": "lazy" }
            div {
                class: "sv-card-body",
                span { class: "sv-card-title", "{title}" }
                span { class: "sv-card-creator", "{creator}" }
                span { class: "sv-count", "♥ {likes}" }
            }
        }
    }
}
