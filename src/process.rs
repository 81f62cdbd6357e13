use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use reqwest::Client;
use tokio::task::spawn_blocking;

use crate::parse::locate_images;
use crate::probe::{build_client, probe_image};
use crate::render::{render_page, HeadlessChrome, Renderer};
use crate::report::{write_report, ImageRecord};
use crate::{error_time, info_time, AuditConfig, Error, Result};

/// Audits the pages listed in `config.url_file` with a headless Chrome and writes the report.
pub async fn run(config: &AuditConfig) -> Result<Vec<ImageRecord>> {
    let client = build_client()?;
    process_pages(Arc::new(HeadlessChrome), &client, config).await
}

/// Renders every page, measures every image found on it and writes one row per measured image.
///
/// Pages that fail to render and images that fail to download or decode are logged and skipped.
/// The run is refused before anything is fetched if the output file already exists.
pub async fn process_pages<R: Renderer>(
    renderer: Arc<R>,
    client: &Client,
    config: &AuditConfig,
) -> Result<Vec<ImageRecord>> {
    guard_output(&config.output).await?;

    let start_time = Local::now();
    let url_list = tokio::fs::read_to_string(&config.url_file).await?;
    let page_urls: Vec<&str> = url_list.lines().collect();
    info_time!("Started auditing {} pages", page_urls.len());

    let mut records = Vec::new();
    for page_url in page_urls {
        let page_start = Local::now();
        let image_urls = match page_images(&renderer, page_url).await {
            Ok(image_urls) => image_urls,
            Err(e) => {
                error_time!("Error al obtener imágenes de {}: {}", page_url, e);
                continue;
            }
        };

        for image_url in image_urls {
            match probe_image(client, &image_url).await {
                Ok(Some(size)) => records.push(ImageRecord::new(page_url, image_url, size)),
                Ok(None) => {}
                Err(Error::ImageDecode { url, .. }) => {
                    error_time!("No se pudo identificar la imagen en {}", url)
                }
                Err(e) => error_time!("Error al obtener la imagen de {}: {}", image_url, e),
            }
        }
        info_time!(page_start, "Processed page {}", page_url);
    }
    info_time!(start_time, "Finished PROCESSING ALL pages, {} images measured.", records.len());

    let output = config.output.clone();
    let records = spawn_blocking(move || write_report(&records, &output).map(|_| records)).await??;

    Ok(records)
}

async fn page_images<R: Renderer>(renderer: &Arc<R>, page_url: &str) -> Result<Vec<String>> {
    let html = render_page(renderer.clone(), page_url).await?;
    let image_urls = locate_images(html, page_url).await?;
    info_time!("Found {} images on {}", image_urls.len(), page_url);
    Ok(image_urls)
}

/// Refuses to run when the output file is already there.
///
/// The file is renamed onto itself first: on platforms that lock open files this fails while
/// the spreadsheet is open elsewhere. Even when the rename succeeds the run is still refused.
async fn guard_output(output: &Path) -> Result<()> {
    if !tokio::fs::try_exists(output).await? {
        return Ok(());
    }
    tokio::fs::rename(output, output)
        .await
        .map_err(|source| Error::OutputLocked {
            path: output.to_path_buf(),
            source,
        })?;
    Err(Error::OutputExists {
        path: output.to_path_buf(),
    })
}
