//! Feed state management
//!
//! Which item is open in the modal, plus the viewer's local likes, follows
//! and the views/durations reported by player sessions during this run.

use dioxus::prelude::*;
use std::collections::{HashMap, HashSet};
use streamview_domain::ContentItem;

/// Feed state shared by the feed grid and the video modal
#[derive(Clone, Copy)]
pub struct FeedState {
    /// Item currently shown in the video modal
    pub selected: Signal<Option<ContentItem>>,
    /// Content ids the viewer liked
    pub liked: Signal<HashSet<String>>,
    /// Creator ids the viewer follows
    pub followed: Signal<HashSet<String>>,
    /// Views tracked per content id since launch
    pub tracked_views: Signal<HashMap<String, u64>>,
    /// Last known duration per content id, in seconds
    pub durations: Signal<HashMap<String, f64>>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            selected: Signal::new(None),
            liked: Signal::new(HashSet::new()),
            followed: Signal::new(HashSet::new()),
            tracked_views: Signal::new(HashMap::new()),
            durations: Signal::new(HashMap::new()),
        }
    }

    pub fn open(&mut self, item: ContentItem) {
        tracing::debug!("Opening content {}", item.id());
        self.selected.set(Some(item));
    }

    pub fn close(&mut self) {
        self.selected.set(None);
    }

    pub fn is_liked(&self, content_id: &str) -> bool {
        self.liked.read().contains(content_id)
    }

    /// Flip the like on `content_id`, returning the new state
    pub fn toggle_like(&mut self, content_id: &str) -> bool {
        toggle_membership(&mut self.liked.write(), content_id)
    }

    pub fn is_following(&self, creator_id: &str) -> bool {
        self.followed.read().contains(creator_id)
    }

    /// Flip the follow on `creator_id`, returning the new state
    pub fn toggle_follow(&mut self, creator_id: &str) -> bool {
        toggle_membership(&mut self.followed.write(), creator_id)
    }

    pub fn record_view(&mut self, content_id: &str) {
        *self
            .tracked_views
            .write()
            .entry(content_id.to_string())
            .or_default() += 1;
    }

    /// Stored view count plus views tracked locally
    pub fn views_for(&self, item: &ContentItem) -> Option<u64> {
        let local = self.tracked_views.read().get(item.id()).copied().unwrap_or(0);
        match item.views_count() {
            Some(stored) => Some(stored.saturating_add(local)),
            None if local > 0 => Some(local),
            None => None,
        }
    }

    pub fn record_duration(&mut self, content_id: &str, seconds: f64) {
        self.durations
            .write()
            .insert(content_id.to_string(), seconds);
    }

    pub fn duration_of(&self, content_id: &str) -> Option<f64> {
        self.durations.read().get(content_id).copied()
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

fn toggle_membership(set: &mut HashSet<String>, key: &str) -> bool {
    if set.remove(key) {
        false
    } else {
        set.insert(key.to_string());
        true
    }
}

/// Hook to access the FeedState from Dioxus context
pub fn use_feed_state() -> FeedState {
    use_context::<FeedState>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_membership_flips() {
        let mut set = HashSet::new();
        assert!(toggle_membership(&mut set, "a"));
        assert!(set.contains("a"));
        assert!(!toggle_membership(&mut set, "a"));
        assert!(set.is_empty());
    }
}
