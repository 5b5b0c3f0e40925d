//! Playback identifier extraction
//!
//! Content items carry a `content_url` that is either a streaming-host URL
//! (`https://stream.mux.com/<id>.m3u8`) or a bare playback id. The embed only
//! accepts the bare id, so every URL must resolve to one or be rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::DomainError;

const SCHEME_DELIMITER: &str = "://";
const MANIFEST_SUFFIX: &str = ".m3u8";

/// Hosts whose URLs carry the playback id as their trailing path segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamHosts(Vec<String>);

impl StreamHosts {
    pub const DEFAULT_HOST: &'static str = "stream.mux.com";

    /// Build from host names; blanks are dropped and names lowercased
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated host list (`"stream.mux.com, cdn.example.com"`)
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(','))
    }

    pub fn contains(&self, host: &str) -> bool {
        self.0.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for StreamHosts {
    fn default() -> Self {
        Self::new([Self::DEFAULT_HOST])
    }
}

/// Identifier the embedded player uses to locate a stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackId(String);

impl PlaybackId {
    /// Resolve the playback id for a content URL.
    ///
    /// - URL on a known streaming host: trailing path segment (minus a
    ///   `.m3u8` suffix)
    /// - no scheme delimiter: the whole trimmed string
    /// - anything else: [`DomainError::UnresolvableSource`]
    pub fn resolve(content_url: &str, hosts: &StreamHosts) -> Result<Self, DomainError> {
        let trimmed = content_url.trim();

        if !trimmed.contains(SCHEME_DELIMITER) {
            return Self::non_empty(trimmed, content_url);
        }

        let url =
            Url::parse(trimmed).map_err(|_| DomainError::unresolvable_source(content_url))?;

        let on_known_host = url.host_str().is_some_and(|host| hosts.contains(host));
        if !on_known_host {
            return Err(DomainError::unresolvable_source(content_url));
        }

        let segment = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .unwrap_or_default();
        let segment = segment.strip_suffix(MANIFEST_SUFFIX).unwrap_or(segment);

        Self::non_empty(segment, content_url)
    }

    fn non_empty(candidate: &str, content_url: &str) -> Result<Self, DomainError> {
        if candidate.is_empty() {
            Err(DomainError::unresolvable_source(content_url))
        } else {
            Ok(Self(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlaybackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_hosts() -> StreamHosts {
        StreamHosts::new(["stream.example.com"])
    }

    #[test]
    fn known_host_yields_trailing_segment() {
        let id = PlaybackId::resolve("https://stream.example.com/abc123", &example_hosts());
        assert_eq!(id.unwrap().as_str(), "abc123");
    }

    #[test]
    fn bare_identifier_is_returned_unchanged() {
        let id = PlaybackId::resolve("abc123", &example_hosts());
        assert_eq!(id.unwrap().as_str(), "abc123");
    }

    #[test]
    fn unrelated_host_is_unresolvable() {
        let err = PlaybackId::resolve("https://unrelated.example.com/x", &example_hosts())
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::unresolvable_source("https://unrelated.example.com/x")
        );
    }

    #[test]
    fn manifest_suffix_and_trailing_slash_are_ignored() {
        let hosts = StreamHosts::default();
        assert_eq!(
            PlaybackId::resolve("https://stream.mux.com/Xy9Z.m3u8", &hosts)
                .unwrap()
                .as_str(),
            "Xy9Z"
        );
        assert_eq!(
            PlaybackId::resolve("https://stream.mux.com/a/b/", &hosts)
                .unwrap()
                .as_str(),
            "b"
        );
    }

    #[test]
    fn host_match_is_case_insensitive() {
        let id = PlaybackId::resolve("https://STREAM.example.com/abc123", &example_hosts());
        assert_eq!(id.unwrap().as_str(), "abc123");
    }

    #[test]
    fn known_host_without_path_is_unresolvable() {
        assert!(PlaybackId::resolve("https://stream.example.com/", &example_hosts()).is_err());
    }

    #[test]
    fn blank_input_is_unresolvable() {
        assert!(PlaybackId::resolve("   ", &example_hosts()).is_err());
        assert!(PlaybackId::resolve("", &example_hosts()).is_err());
    }

    #[test]
    fn malformed_url_is_unresolvable() {
        assert!(PlaybackId::resolve("https://", &example_hosts()).is_err());
    }

    #[test]
    fn host_list_parses_csv() {
        let hosts = StreamHosts::from_csv(" stream.mux.com, ,CDN.Example.com ");
        assert_eq!(
            hosts.iter().collect::<Vec<_>>(),
            vec!["stream.mux.com", "cdn.example.com"]
        );
        assert!(hosts.contains("cdn.example.com"));
    }
}
