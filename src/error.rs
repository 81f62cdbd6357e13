use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseInvalidSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Url Error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Headless browser couldn't render {url}: {reason}")]
    Render { url: String, reason: String },
    #[error("Couldn't identify the image at {url}: {source}")]
    ImageDecode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Output file {} is locked: {}", .path.display(), .source)]
    OutputLocked {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Output file {} already exists.", .path.display())]
    OutputExists { path: PathBuf },
    #[error("Xlsx Error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
