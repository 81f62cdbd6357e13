use reqwest::{header::CONTENT_TYPE, Client};
use tokio::task::spawn_blocking;

use crate::{Result, SIZE_LIMIT_KB};

/// Downloaded size of an image body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    bytes: u64,
}

impl ImageSize {
    pub fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Size in kilobytes rounded to one decimal.
    pub fn kb(&self) -> f64 {
        (self.bytes as f64 / 1024.0 * 10.0).round() / 10.0
    }

    /// Judged on the rounded size, so whatever shows as `500.0` is still within the limit.
    pub fn within_limit(&self) -> bool {
        self.kb() <= SIZE_LIMIT_KB as f64
    }
}

/// Client used for image downloads. Certificate validation is off so that sites with
/// self-signed or broken certificates can still be audited.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(client)
}

/// Downloads the image and returns its size.
///
/// `Ok(None)` means the response isn't an image at all. Non-success statuses,
/// network errors and raster bodies that don't decode are errors.
/// SVG bodies are sized as-is, without decoding.
pub async fn probe_image(client: &Client, image_url: &str) -> Result<Option<ImageSize>> {
    let res = client.get(image_url).send().await?.error_for_status()?;

    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.starts_with("image/") {
        return Ok(None);
    }

    let body = res.bytes().await?;
    let size = ImageSize::from_bytes(body.len() as u64);

    if !content_type.contains("svg") {
        let url = image_url.to_string();
        spawn_blocking(move || {
            image::load_from_memory(&body)
                .map(|_| ())
                .map_err(|source| crate::Error::ImageDecode { url, source })
        })
        .await??;
    }

    Ok(Some(size))
}
