pub mod config;
pub mod error;
pub mod report;
pub mod section;

pub use config::{CheckerConfig, Viewport};
pub use error::{Error, Result};
pub use report::{CheckResult, ConsoleLevel, ConsoleMessage, ReportWriter, RunReport, Status};
pub use section::PageSection;
