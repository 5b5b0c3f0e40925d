//! Device class derived from the viewport

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Viewports narrower than this (logical px) are treated as mobile
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Coarse device classification used for layout and preload policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    pub fn all() -> &'static [DeviceClass] {
        &[DeviceClass::Mobile, DeviceClass::Desktop]
    }

    /// Classify a viewport width. Non-finite widths fall back to `Desktop`.
    pub fn from_viewport_width(width: f64) -> Self {
        if width.is_finite() && width < MOBILE_BREAKPOINT_PX {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeviceClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(DeviceClass::Mobile),
            "desktop" => Ok(DeviceClass::Desktop),
            _ => Err(DomainError::parse(format!("Unknown device class: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewport_is_mobile() {
        assert_eq!(DeviceClass::from_viewport_width(375.0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport_width(767.9), DeviceClass::Mobile);
    }

    #[test]
    fn breakpoint_and_wider_is_desktop() {
        assert_eq!(DeviceClass::from_viewport_width(768.0), DeviceClass::Desktop);
        assert_eq!(DeviceClass::from_viewport_width(1920.0), DeviceClass::Desktop);
    }

    #[test]
    fn non_finite_width_is_desktop() {
        assert_eq!(DeviceClass::from_viewport_width(f64::NAN), DeviceClass::Desktop);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Mobile ".parse::<DeviceClass>(), Ok(DeviceClass::Mobile));
        assert!("tablet".parse::<DeviceClass>().is_err());
    }
}
