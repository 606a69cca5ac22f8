//! PDF imposition - arranging A5 pages two-up for duplex printing
//!
//! This module orchestrates the imposition process:
//! 1. Collect source pages in reading order
//! 2. Plan which page goes in which slot (booklet or cut)
//! 3. Compose the output sheets with `lopdf`

mod compose;
mod io;

pub use compose::{compose, compose_to_bytes};
pub use io::{load_pdf, load_pdf_bytes, save_pdf, save_pdf_bytes};

use crate::layout::plan_layout;
use crate::options::ImpositionOptions;
use crate::render::get_page_dimensions;
use crate::types::*;
use lopdf::{Document, ObjectId};

/// Main imposition function
///
/// Runs the blocking work on tokio's blocking pool.
pub async fn impose(source: Document, options: ImpositionOptions) -> Result<Document> {
    tokio::task::spawn_blocking(move || impose_document(&source, &options)).await?
}

/// Impose `source` synchronously
pub fn impose_document(source: &Document, options: &ImpositionOptions) -> Result<Document> {
    options.validate()?;

    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    let plan = plan_layout(page_ids.len(), options.mode);

    let first_page = match page_ids.first() {
        Some(&id) => get_page_dimensions(source, id)?,
        None => crate::constants::DEFAULT_PAGE_DIMENSIONS,
    };
    let (sheet_width_pt, sheet_height_pt) = options.sheet_dimensions_pt(first_page);

    compose(source, &page_ids, &plan, sheet_width_pt, sheet_height_pt)
}

/// Bytes in, bytes out, with the default A4 landscape sheet
pub fn impose_bytes(pdf: &[u8], mode: PrintMode) -> Result<Vec<u8>> {
    let source = load_pdf_bytes(pdf)?;
    let output = impose_document(&source, &ImpositionOptions::new(mode))?;
    save_pdf_bytes(output)
}
