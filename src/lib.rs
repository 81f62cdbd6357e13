//! IMAGE WEIGHT AUDIT
//! Renders every page listed in `urls.txt`, finds the images it embeds, downloads them
//! and writes their sizes to `resultados.xlsx`, flagging anything over the size limit.

use std::path::PathBuf;

mod error;
mod macros;
mod parse;
pub mod probe;
pub mod process;
pub mod render;
pub mod report;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};

/// One page URL per line.
pub const URL_FILE: &str = "urls.txt";
pub const OUTPUT_FILE: &str = "resultados.xlsx";
/// Images up to and including this size are `OK`.
pub const SIZE_LIMIT_KB: u64 = 500;
const STATUS_OK: &str = "OK";
const STATUS_NOT_OK: &str = "NO OK";

/// Where the page list is read from and where the report is written.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub url_file: PathBuf,
    pub output: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            url_file: PathBuf::from(URL_FILE),
            output: PathBuf::from(OUTPUT_FILE),
        }
    }
}
