//! Content catalog loading
//!
//! A catalog is a JSON array of [`ContentItem`]s. When none is configured,
//! or the configured one cannot be read, the built-in sample is used.

use std::path::Path;

use anyhow::{Context, Result};
use streamview_domain::{ContentItem, Creator};

use super::config::PlayerConfig;

/// Parse a catalog from JSON text
pub fn parse_catalog(json: &str) -> Result<Vec<ContentItem>> {
    serde_json::from_str(json).context("catalog is not a valid list of content items")
}

/// Read and parse a catalog file
pub fn load_catalog(path: &Path) -> Result<Vec<ContentItem>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    parse_catalog(&json).with_context(|| format!("failed to parse catalog {}", path.display()))
}

/// Catalog for this run: the configured file, else the sample
pub fn resolve_catalog(config: &PlayerConfig) -> Vec<ContentItem> {
    let Some(path) = config.catalog_path.as_deref() else {
        return sample_catalog();
    };

    match load_catalog(path) {
        Ok(items) => {
            tracing::info!("Loaded {} content items from {}", items.len(), path.display());
            items
        }
        Err(e) => {
            tracing::error!("{:#}; falling back to sample catalog", e);
            sample_catalog()
        }
    }
}

/// Built-in catalog backed by public test streams
pub fn sample_catalog() -> Vec<ContentItem> {
    let studio = Creator::new("c-studio", "Studio Loop");
    let coast = Creator::new("c-coast", "Coastline Films")
        .with_avatar_url("https://image.mux.com/a4nOgmxGWg6gULfcBbAa00gXyfcwPnAFldF8RdsNyk8M/thumbnail.jpg?width=64");

    vec![
        ContentItem::new(
            "sample-1",
            "Big Buck Bunny",
            studio.clone(),
            "https://image.mux.com/DS00Spx1CV902MCtPj5WknGlR102V5HFkDe/thumbnail.jpg",
            "https://stream.mux.com/DS00Spx1CV902MCtPj5WknGlR102V5HFkDe.m3u8",
        )
        .with_like_count(1_284)
        .with_views_count(48_210)
        .with_description("A large rabbit has a very bad day in the forest."),
        ContentItem::new(
            "sample-2",
            "Coastal Drift",
            coast.clone(),
            "https://image.mux.com/a4nOgmxGWg6gULfcBbAa00gXyfcwPnAFldF8RdsNyk8M/thumbnail.jpg",
            "a4nOgmxGWg6gULfcBbAa00gXyfcwPnAFldF8RdsNyk8M",
        )
        .with_like_count(312)
        .with_views_count(9_870),
        ContentItem::new(
            "sample-3",
            "Tears of Steel",
            studio,
            "https://image.mux.com/v69RSHhFelSm4701snP22dYz2jICy4E4FUyk02rW4gxRM/thumbnail.jpg",
            "https://stream.mux.com/v69RSHhFelSm4701snP22dYz2jICy4E4FUyk02rW4gxRM",
        )
        .with_like_count(2_450_000)
        .with_views_count(18_400_000)
        .with_description("Sci-fi short set in a future Amsterdam."),
        ContentItem::new(
            "sample-4",
            "Harbour Timelapse",
            coast,
            "https://image.mux.com/x36xhzz/thumbnail.jpg",
            "https://stream.mux.com/x36xhzz.m3u8",
        )
        .with_like_count(57),
    ]
}
