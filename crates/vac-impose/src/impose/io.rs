//! Document I/O operations for imposition

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || load_pdf_bytes(&bytes)).await??;
    log::info!(
        "Loaded {} ({} pages)",
        path.display(),
        doc.get_pages().len()
    );
    Ok(doc)
}

/// Decode a PDF held in memory
pub fn load_pdf_bytes(bytes: &[u8]) -> Result<Document> {
    Ok(Document::load_mem(bytes)?)
}

/// Save the imposed document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || save_pdf_bytes(doc)).await??;
    tokio::fs::write(&path, &bytes).await?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Serialize a document to PDF bytes
pub fn save_pdf_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}
