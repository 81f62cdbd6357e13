use std::ffi::OsStr;
use std::sync::Arc;

use headless_chrome::{Browser, LaunchOptionsBuilder};
use tokio::task::spawn_blocking;

use crate::{Error, Result};

/// Turns a page URL into the markup of the fully rendered document.
pub trait Renderer: Send + Sync + 'static {
    fn render(&self, page_url: &str) -> Result<String>;
}

/// Launches a fresh headless Chrome for every page and shuts it down before returning.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessChrome;

impl Renderer for HeadlessChrome {
    fn render(&self, page_url: &str) -> Result<String> {
        let render_err = |reason: String| Error::Render {
            url: page_url.to_string(),
            reason,
        };

        let launch_opts = LaunchOptionsBuilder::default()
            .headless(true)
            .args(vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-dev-shm-usage"),
            ])
            .build()
            .map_err(|e| render_err(e.to_string()))?;
        // The browser process is killed when `browser` is dropped, on every return path.
        let browser = Browser::new(launch_opts).map_err(|e| render_err(e.to_string()))?;
        let tab = browser.new_tab().map_err(|e| render_err(e.to_string()))?;

        let html = tab
            .navigate_to(page_url)
            .and_then(|tab| tab.wait_until_navigated())
            .and_then(|tab| tab.get_content())
            .map_err(|e| render_err(e.to_string()))?;

        Ok(html)
    }
}

/// Runs the (blocking) renderer on the blocking pool.
pub async fn render_page<R: Renderer>(renderer: Arc<R>, page_url: &str) -> Result<String> {
    let page_url = page_url.to_string();
    spawn_blocking(move || renderer.render(&page_url)).await?
}
