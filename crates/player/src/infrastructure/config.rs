//! Player configuration
//!
//! Read once by the composition root and handed to the UI through the
//! Dioxus launch context. Every variable is optional; unparseable values are
//! logged and replaced by their default.

use std::path::PathBuf;

use streamview_domain::{DeviceClass, NetworkTier, StreamHosts};

pub const STREAM_HOSTS_VAR: &str = "STREAMVIEW_STREAM_HOSTS";
pub const SHELL_VAR: &str = "STREAMVIEW_SHELL";
pub const NETWORK_TIER_VAR: &str = "STREAMVIEW_NETWORK_TIER";
pub const CATALOG_VAR: &str = "STREAMVIEW_CATALOG";

/// Configuration loaded from environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Hosts whose URLs carry a playback id in their last path segment
    pub stream_hosts: StreamHosts,
    /// Forced device class (desktop builds have no live viewport signal)
    pub device_override: Option<DeviceClass>,
    /// Forced network tier (desktop builds have no connection signal)
    pub tier_override: Option<NetworkTier>,
    /// JSON catalog to show instead of the built-in sample
    pub catalog_path: Option<PathBuf>,
}

impl PlayerConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let stream_hosts = var(STREAM_HOSTS_VAR)
            .map(|csv| StreamHosts::from_csv(&csv))
            .filter(|hosts| !hosts.is_empty())
            .unwrap_or_default();

        Self {
            stream_hosts,
            device_override: var(SHELL_VAR).and_then(|v| parse_or_warn(SHELL_VAR, &v)),
            tier_override: var(NETWORK_TIER_VAR).and_then(|v| parse_or_warn(NETWORK_TIER_VAR, &v)),
            catalog_path: var(CATALOG_VAR).map(|v| PathBuf::from(v.trim())),
        }
    }
}

fn parse_or_warn<T>(key: &str, value: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Ignoring {}={:?}: {}", key, value, e);
            None
        }
    }
}
