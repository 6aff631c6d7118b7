mod chrome_finder;
mod error;
mod locator;
mod probe;
mod session;

pub use chrome_finder::find_chrome;
pub use chromiumoxide::element::Element;
pub use error::{Error, Result};
pub use locator::{Found, Locator, Matcher};
pub use probe::{js_string, Probe};
pub use session::BrowserSession;
