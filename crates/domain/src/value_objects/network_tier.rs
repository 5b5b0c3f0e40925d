//! Coarse network quality classification
//!
//! The canonical signal is the browser's effective connection type
//! (`navigator.connection.effectiveType`), an estimate of observed quality.
//! The raw link type (`wifi`, `cellular`, ...) says nothing about throughput
//! and is deliberately not mapped here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Network tier used to pick playback ceilings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkTier {
    Excellent,
    /// 3g-equivalent
    Good,
    Poor,
    VeryPoor,
    /// No signal available (unsupported environment or unrecognised value)
    #[default]
    Unknown,
}

impl NetworkTier {
    /// All tiers, best first
    pub fn all() -> &'static [NetworkTier] {
        &[
            NetworkTier::Excellent,
            NetworkTier::Good,
            NetworkTier::Poor,
            NetworkTier::VeryPoor,
            NetworkTier::Unknown,
        ]
    }

    /// Map an `effectiveType` value to a tier.
    ///
    /// Total: absent or unrecognised values become `Unknown`.
    pub fn from_effective_type(effective_type: Option<&str>) -> Self {
        match effective_type.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("slow-2g") => NetworkTier::VeryPoor,
            Some("2g") => NetworkTier::Poor,
            Some("3g") => NetworkTier::Good,
            Some("4g") => NetworkTier::Excellent,
            _ => NetworkTier::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkTier::Excellent => "excellent",
            NetworkTier::Good => "good",
            NetworkTier::Poor => "poor",
            NetworkTier::VeryPoor => "very-poor",
            NetworkTier::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NetworkTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NetworkTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(NetworkTier::Excellent),
            "good" => Ok(NetworkTier::Good),
            "poor" => Ok(NetworkTier::Poor),
            "very-poor" | "very_poor" => Ok(NetworkTier::VeryPoor),
            "unknown" => Ok(NetworkTier::Unknown),
            _ => Err(DomainError::parse(format!("Unknown network tier: {}", s))),
        }
    }
}
