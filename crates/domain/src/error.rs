//! Unified error types for the domain layer
//!
//! Provides a common error type for domain operations so adapters and the
//! presentation layer can match on failure kinds instead of strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No playback identifier could be derived from a content URL.
    ///
    /// Surfaced to the viewer as a "cannot play" state and never retried.
    #[error("No playable identifier in content URL: {content_url}")]
    UnresolvableSource { content_url: String },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create an unresolvable source error for the given content URL
    pub fn unresolvable_source(content_url: impl Into<String>) -> Self {
        Self::UnresolvableSource {
            content_url: content_url.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for DeviceClass {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "mobile" => Ok(Self::Mobile),
    ///             _ => Err(DomainError::parse(format!("Unknown device class: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether this error should be shown to the viewer as a "cannot play" state
    pub fn is_unplayable(&self) -> bool {
        matches!(self, Self::UnresolvableSource { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolvable_source_message_includes_url() {
        let err = DomainError::unresolvable_source("https://unrelated.example.com/x");
        assert_eq!(
            err.to_string(),
            "No playable identifier in content URL: https://unrelated.example.com/x"
        );
        assert!(err.is_unplayable());
    }

    #[test]
    fn parse_error_is_not_unplayable() {
        assert!(!DomainError::parse("bad tier").is_unplayable());
    }
}
