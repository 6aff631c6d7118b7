use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Browser viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Emulate a mobile device (touch, mobile UA hints)
    #[serde(default)]
    pub mobile: bool,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mobile: false,
        }
    }

    pub const fn mobile(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mobile: true,
        }
    }
}

impl FromStr for Viewport {
    type Err = Error;

    /// Parse a `WIDTHxHEIGHT` string such as `1440x900`
    fn from_str(s: &str) -> Result<Self> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| Error::Config(format!("Expected WIDTHxHEIGHT, got: {}", s)))?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::Config(format!("Invalid viewport width: {}", w)))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::Config(format!("Invalid viewport height: {}", h)))?;

        if width == 0 || height == 0 {
            return Err(Error::Config(format!("Viewport must be non-zero: {}", s)));
        }

        Ok(Self {
            width,
            height,
            mobile: false,
        })
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Configuration for a checker run.
///
/// Everything the run depends on externally (target URL, viewport presets,
/// settle delays, output locations) is carried here so checks themselves
/// stay free of deployment-specific constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Base URL of the page under test
    pub base_url: String,

    /// Desktop viewport preset
    pub desktop: Viewport,

    /// Mobile viewport preset
    pub mobile: Viewport,

    /// Fixed settle delay after navigation/viewport/scroll/click mutations
    pub settle_ms: u64,

    /// Upper bound for the initial navigation
    pub nav_timeout_secs: u64,

    /// Upper bound for poll-until-stable sampling of animated properties
    pub stability_timeout_ms: u64,

    /// Directory for screenshots and the JSON report
    pub output_dir: PathBuf,

    /// Explicit Chrome binary path; discovered if absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Run the browser headless
    pub headless: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173/".to_string(),
            desktop: Viewport::new(1440, 900),
            mobile: Viewport::mobile(375, 812),
            settle_ms: 800,
            nav_timeout_secs: 30,
            stability_timeout_ms: 3000,
            output_dir: PathBuf::from("qa-output"),
            chrome_path: None,
            headless: true,
        }
    }
}

impl CheckerConfig {
    /// Validate the configured base URL
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_parses_dimensions() {
        let vp: Viewport = "1440x900".parse().unwrap();
        assert_eq!(vp.width, 1440);
        assert_eq!(vp.height, 900);
        assert!(!vp.mobile);
    }

    #[test]
    fn test_viewport_parses_uppercase_separator() {
        let vp: Viewport = "375X812".parse().unwrap();
        assert_eq!(vp.width, 375);
        assert_eq!(vp.height, 812);
    }

    #[test]
    fn test_viewport_rejects_garbage() {
        assert!("wide".parse::<Viewport>().is_err());
        assert!("1440".parse::<Viewport>().is_err());
        assert!("1440xtall".parse::<Viewport>().is_err());
        assert!("0x900".parse::<Viewport>().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = CheckerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.desktop, Viewport::new(1440, 900));
        assert!(config.mobile.mobile);
        assert!(config.headless);
    }

    #[test]
    fn test_config_rejects_bad_url() {
        let config = CheckerConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
