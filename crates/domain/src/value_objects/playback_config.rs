//! Playback configuration policy
//!
//! Maps observed conditions to the two knobs the embedded player exposes:
//! a resolution ceiling for its own adaptive selection, and how much of the
//! media to fetch before the viewer presses play.
//!
//! ## Policy
//!
//! | tier        | max resolution                  |
//! |-------------|---------------------------------|
//! | very-poor   | 480p                            |
//! | poor        | 480p                            |
//! | good        | 720p                            |
//! | excellent   | 1080p                           |
//! | unknown     | 720p on mobile, 1080p on desktop |
//!
//! Preload is `metadata` on mobile for every tier and `auto` on desktop for
//! every tier.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DeviceClass, NetworkTier};

/// Upper bound for the player's internal rendition choice (not a forced resolution)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaxResolution {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl MaxResolution {
    /// Attribute value understood by the embed
    pub fn as_attr(&self) -> &'static str {
        match self {
            MaxResolution::P480 => "480p",
            MaxResolution::P720 => "720p",
            MaxResolution::P1080 => "1080p",
        }
    }
}

impl fmt::Display for MaxResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

/// How much of the media resource is fetched before user-initiated playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreloadStrategy {
    None,
    Metadata,
    Auto,
}

impl PreloadStrategy {
    /// Attribute value understood by the embed (HTML `preload` semantics)
    pub fn as_attr(&self) -> &'static str {
        match self {
            PreloadStrategy::None => "none",
            PreloadStrategy::Metadata => "metadata",
            PreloadStrategy::Auto => "auto",
        }
    }
}

impl fmt::Display for PreloadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

/// Derived playback configuration. Has no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub max_resolution: MaxResolution,
    pub preload: PreloadStrategy,
}

/// Select the playback configuration for the observed conditions.
///
/// Total and deterministic: identical inputs always yield identical output.
pub fn select_config(tier: NetworkTier, device: DeviceClass) -> PlaybackConfig {
    let max_resolution = match tier {
        NetworkTier::VeryPoor | NetworkTier::Poor => MaxResolution::P480,
        NetworkTier::Good => MaxResolution::P720,
        NetworkTier::Excellent => MaxResolution::P1080,
        NetworkTier::Unknown => match device {
            DeviceClass::Mobile => MaxResolution::P720,
            DeviceClass::Desktop => MaxResolution::P1080,
        },
    };

    // Mobile stays conservative even on fast links; desktop preloads fully.
    let preload = match device {
        DeviceClass::Mobile => PreloadStrategy::Metadata,
        DeviceClass::Desktop => PreloadStrategy::Auto,
    };

    PlaybackConfig {
        max_resolution,
        preload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_pairs() -> impl Iterator<Item = (NetworkTier, DeviceClass)> {
        NetworkTier::all()
            .iter()
            .flat_map(|t| DeviceClass::all().iter().map(move |d| (*t, *d)))
    }

    #[test]
    fn selection_is_deterministic() {
        for (tier, device) in all_pairs() {
            assert_eq!(select_config(tier, device), select_config(tier, device));
        }
    }

    #[test]
    fn constrained_tiers_cap_at_480p_on_any_device() {
        for device in DeviceClass::all() {
            for tier in [NetworkTier::VeryPoor, NetworkTier::Poor] {
                assert_eq!(
                    select_config(tier, *device).max_resolution,
                    MaxResolution::P480
                );
            }
        }
    }

    #[test]
    fn good_tier_caps_at_720p() {
        for device in DeviceClass::all() {
            assert_eq!(
                select_config(NetworkTier::Good, *device).max_resolution,
                MaxResolution::P720
            );
        }
    }

    #[test]
    fn excellent_tier_allows_1080p() {
        for device in DeviceClass::all() {
            assert_eq!(
                select_config(NetworkTier::Excellent, *device).max_resolution,
                MaxResolution::P1080
            );
        }
    }

    #[test]
    fn unknown_tier_depends_on_device() {
        assert_eq!(
            select_config(NetworkTier::Unknown, DeviceClass::Mobile).max_resolution,
            MaxResolution::P720
        );
        assert_eq!(
            select_config(NetworkTier::Unknown, DeviceClass::Desktop).max_resolution,
            MaxResolution::P1080
        );
    }

    #[test]
    fn mobile_always_preloads_metadata() {
        for tier in NetworkTier::all() {
            assert_eq!(
                select_config(*tier, DeviceClass::Mobile).preload,
                PreloadStrategy::Metadata
            );
        }
    }

    #[test]
    fn desktop_always_preloads_auto() {
        for tier in NetworkTier::all() {
            assert_eq!(
                select_config(*tier, DeviceClass::Desktop).preload,
                PreloadStrategy::Auto
            );
        }
    }

    #[test]
    fn attribute_strings_match_embed_vocabulary() {
        let config = select_config(NetworkTier::Poor, DeviceClass::Mobile);
        assert_eq!(config.max_resolution.as_attr(), "480p");
        assert_eq!(config.preload.as_attr(), "metadata");
        assert_eq!(PreloadStrategy::None.to_string(), "none");
    }
}
