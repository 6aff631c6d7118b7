pub mod commands;
pub mod reporter;

use clap::Args;
use pagecheck_core::{CheckerConfig, Viewport};
use std::path::PathBuf;

/// Options shared by every battery-running subcommand
#[derive(Args, Debug)]
pub struct RunOpts {
    /// Base URL of the page under test
    #[arg(long, default_value = "http://localhost:5173/")]
    pub url: String,

    /// Directory for screenshots and the JSON report
    #[arg(long, default_value = "qa-output")]
    pub out: PathBuf,

    /// Desktop viewport as WIDTHxHEIGHT
    #[arg(long, default_value = "1440x900")]
    pub desktop: String,

    /// Mobile viewport as WIDTHxHEIGHT
    #[arg(long, default_value = "375x812")]
    pub mobile: String,

    /// Settle delay after navigation/viewport/scroll/click mutations
    #[arg(long, default_value_t = 800)]
    pub settle_ms: u64,

    /// Upper bound for the initial navigation, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Explicit Chrome binary path (discovered if omitted)
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Run with a visible browser window instead of headless
    #[arg(long)]
    pub headful: bool,
}

impl RunOpts {
    /// Build a validated checker configuration from the CLI flags
    pub fn to_config(&self) -> anyhow::Result<CheckerConfig> {
        let desktop: Viewport = self.desktop.parse()?;
        let mut mobile: Viewport = self.mobile.parse()?;
        mobile.mobile = true;

        let config = CheckerConfig {
            base_url: self.url.clone(),
            desktop,
            mobile,
            settle_ms: self.settle_ms,
            nav_timeout_secs: self.timeout_secs,
            output_dir: self.out.clone(),
            chrome_path: self.chrome_path.clone(),
            headless: !self.headful,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> RunOpts {
        RunOpts {
            url: "http://localhost:5173/".to_string(),
            out: PathBuf::from("qa-output"),
            desktop: "1440x900".to_string(),
            mobile: "375x812".to_string(),
            settle_ms: 800,
            timeout_secs: 30,
            chrome_path: None,
            headful: false,
        }
    }

    #[test]
    fn test_opts_build_config() {
        let config = opts().to_config().unwrap();
        assert_eq!(config.desktop, Viewport::new(1440, 900));
        assert!(config.mobile.mobile);
        assert!(config.headless);
        assert_eq!(config.nav_timeout_secs, 30);
    }

    #[test]
    fn test_opts_reject_bad_viewport() {
        let mut bad = opts();
        bad.desktop = "wide".to_string();
        assert!(bad.to_config().is_err());
    }

    #[test]
    fn test_opts_reject_bad_url() {
        let mut bad = opts();
        bad.url = "localhost without scheme".to_string();
        assert!(bad.to_config().is_err());
    }

    #[test]
    fn test_headful_flag_disables_headless() {
        let mut opts = opts();
        opts.headful = true;
        assert!(!opts.to_config().unwrap().headless);
    }
}
