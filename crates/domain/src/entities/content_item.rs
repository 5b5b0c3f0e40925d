//! Video content items shown in the feed and the video modal.
//!
//! The wire shape (camelCase) matches what hosting catalogs send:
//!
//! ```json
//! {
//!   "id": "v1",
//!   "title": "Sunrise",
//!   "creator": { "id": "c1", "displayName": "Ana" },
//!   "thumbnailUrl": "https://image.mux.com/abc/thumbnail.jpg",
//!   "contentUrl": "https://stream.mux.com/abc.m3u8",
//!   "likeCount": 12
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::common::some_if_not_empty;
use crate::value_objects::{PlaybackId, StreamHosts};
use crate::DomainError;

/// Who published a content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    id: String,
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
}

impl Creator {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = some_if_not_empty(url.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// First letter of the display name, for avatar placeholders
    pub fn initial(&self) -> String {
        self.display_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// A playable video with its social metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    id: String,
    title: String,
    creator: Creator,
    thumbnail_url: String,
    content_url: String,
    #[serde(default)]
    like_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    views_count: Option<u64>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    description: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(some_if_not_empty))
}

impl ContentItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        creator: Creator,
        thumbnail_url: impl Into<String>,
        content_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            creator,
            thumbnail_url: thumbnail_url.into(),
            content_url: content_url.into(),
            like_count: 0,
            views_count: None,
            description: None,
        }
    }

    pub fn with_like_count(mut self, count: u64) -> Self {
        self.like_count = count;
        self
    }

    pub fn with_views_count(mut self, count: u64) -> Self {
        self.views_count = Some(count);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = some_if_not_empty(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn creator(&self) -> &Creator {
        &self.creator
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn content_url(&self) -> &str {
        &self.content_url
    }

    pub fn like_count(&self) -> u64 {
        self.like_count
    }

    pub fn views_count(&self) -> Option<u64> {
        self.views_count
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Resolve the embed playback id for this item's `content_url`
    pub fn playback_id(&self, hosts: &StreamHosts) -> Result<PlaybackId, DomainError> {
        PlaybackId::resolve(&self.content_url, hosts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_ENTRY: &str = r#"{
        "id": "v1",
        "title": "Sunrise over the bay",
        "creator": { "id": "c1", "displayName": "ana", "avatarUrl": "https://img/ana.png" },
        "thumbnailUrl": "https://image.mux.com/abc/thumbnail.jpg",
        "contentUrl": "https://stream.mux.com/abc.m3u8",
        "likeCount": 1250,
        "viewsCount": 98000,
        "description": "  "
    }"#;

    #[test]
    fn deserializes_catalog_entry() {
        let item: ContentItem = serde_json::from_str(CATALOG_ENTRY).unwrap();
        assert_eq!(item.id(), "v1");
        assert_eq!(item.creator().display_name(), "ana");
        assert_eq!(item.creator().avatar_url(), Some("https://img/ana.png"));
        assert_eq!(item.like_count(), 1250);
        assert_eq!(item.views_count(), Some(98000));
    }

    #[test]
    fn blank_description_becomes_none() {
        let item: ContentItem = serde_json::from_str(CATALOG_ENTRY).unwrap();
        assert_eq!(item.description(), None);
    }

    #[test]
    fn optional_counters_default() {
        let json = r#"{
            "id": "v2",
            "title": "t",
            "creator": { "id": "c", "displayName": "d" },
            "thumbnailUrl": "",
            "contentUrl": "abc123"
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.like_count(), 0);
        assert_eq!(item.views_count(), None);
    }

    #[test]
    fn playback_id_uses_content_url() {
        let item: ContentItem = serde_json::from_str(CATALOG_ENTRY).unwrap();
        let id = item.playback_id(&StreamHosts::default()).unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn creator_initial_is_uppercased() {
        assert_eq!(Creator::new("c", "ana").initial(), "A");
        assert_eq!(Creator::new("c", "").initial(), "?");
    }
}
