use scraper::{Html, Selector};
use tokio::task::spawn_blocking;
use url::Url;

use crate::{Error, Result};

/// Parses the rendered page and returns the absolute URL of every `<img>` that has a `src`,
/// in document order. Relative sources are joined onto `page_url`.
pub(crate) async fn locate_images(html: String, page_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(page_url)?;
    let image_urls = spawn_blocking(move || extract_image_urls(&html, &base)).await??;

    Ok(image_urls)
}

fn extract_image_urls(html: &str, base: &Url) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let img_selector = create_selector("img[src]")?;

    let image_urls = doc
        .select(&img_selector)
        .filter_map(|img| img.value().attr("src"))
        // A src that can't be joined never becomes a fetchable URL.
        .filter_map(|src| base.join(src).ok())
        .map(String::from)
        .collect();
    Ok(image_urls)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseInvalidSelector(sel_str.into()))
}
