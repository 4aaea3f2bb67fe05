pub mod headless;
pub mod session;

pub use headless::{ChromiumLauncher, ChromiumSession};
pub use session::{await_ready, BrowserLauncher, BrowserSession, SessionGuard};
