//! Opening issue pages in the system browser.

use tracing::{debug, warn};

/// Fire-and-forget URL launcher.
pub trait UrlOpener {
    fn open(&self, url: &str);
}

/// Opens URLs with the platform's default handler (`xdg-open`, `open`, ...).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) {
        debug!(url, "Opening in browser");
        if let Err(e) = open::that_detached(url) {
            warn!(url, error = %e, "Failed to launch browser");
        }
    }
}
