use std::fmt;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::probe::ImageSize;
use crate::{Result, STATUS_NOT_OK, STATUS_OK};

const HEADERS: [&str; 4] = ["URL", "Imagen", "Tamaño (KB)", "Estado"];
/// Extra characters added to the widest cell of every column.
const WIDTH_MARGIN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotOk,
}

impl Status {
    pub fn for_size(size: ImageSize) -> Self {
        if size.within_limit() {
            Status::Ok
        } else {
            Status::NotOk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Ok => STATUS_OK,
            Status::NotOk => STATUS_NOT_OK,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the report: an image found on a page and how heavy it is.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub page_url: String,
    pub image_url: String,
    pub size_kb: f64,
    pub status: Status,
}

impl ImageRecord {
    pub fn new(page_url: impl Into<String>, image_url: impl Into<String>, size: ImageSize) -> Self {
        Self {
            page_url: page_url.into(),
            image_url: image_url.into(),
            size_kb: size.kb(),
            status: Status::for_size(size),
        }
    }

    /// Cell texts in column order, as they are measured for column widths.
    fn cell_texts(&self) -> [String; 4] {
        [
            self.page_url.clone(),
            self.image_url.clone(),
            format!("{:.1}", self.size_kb),
            self.status.label().to_string(),
        ]
    }
}

/// Width of every column: the longest cell text (header included) plus a small margin.
fn column_widths(records: &[ImageRecord]) -> [usize; 4] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for record in records {
        for (width, text) in widths.iter_mut().zip(record.cell_texts()) {
            *width = (*width).max(text.chars().count());
        }
    }
    widths.map(|w| w + WIDTH_MARGIN)
}

/// Writes the records to a single-sheet workbook at `output`.
///
/// The header row is bold, every cell is aligned left and centered vertically,
/// and the size column is displayed with one decimal.
pub fn write_report(records: &[ImageRecord], output: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let cell_fmt = Format::new()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);
    let header_fmt = cell_fmt.clone().set_bold();
    let size_fmt = cell_fmt.clone().set_num_format("0.0");

    for (col, header) in (0u16..).zip(HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_fmt)?;
    }

    for (row, record) in (1u32..).zip(records) {
        worksheet.write_string_with_format(row, 0, &record.page_url, &cell_fmt)?;
        worksheet.write_string_with_format(row, 1, &record.image_url, &cell_fmt)?;
        worksheet.write_number_with_format(row, 2, record.size_kb, &size_fmt)?;
        worksheet.write_string_with_format(row, 3, record.status.label(), &cell_fmt)?;
    }

    for (col, width) in (0u16..).zip(column_widths(records)) {
        worksheet.set_column_width(col, width as f64)?;
    }

    workbook.save(output)?;
    Ok(())
}
