//! Sheet composition: turn a layout plan into an output document

use crate::layout::LayoutPlan;
use crate::render::{EmbedCache, SheetGeometry, render_face};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Build the imposed document for `plan`.
///
/// Every face of the plan becomes one `sheet_width_pt × sheet_height_pt`
/// page, in plan order. An empty plan produces a valid zero-page document.
pub fn compose(
    source: &Document,
    page_ids: &[ObjectId],
    plan: &LayoutPlan,
    sheet_width_pt: f32,
    sheet_height_pt: f32,
) -> Result<Document> {
    let geometry = SheetGeometry {
        width_pt: sheet_width_pt,
        height_pt: sheet_height_pt,
    };

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::with_capacity(plan.page_count());
    let mut cache = EmbedCache::new();

    for face in &plan.faces {
        let page_id = render_face(
            &mut output,
            source,
            page_ids,
            face,
            geometry,
            pages_tree_id,
            &mut cache,
        )?;
        page_refs.push(Object::Reference(page_id));
    }

    log::debug!(
        "Composed {} output pages ({} x {} pt) from {} embedded source pages",
        page_refs.len(),
        sheet_width_pt,
        sheet_height_pt,
        cache.embedded_pages()
    );

    finalize_document(&mut output, pages_tree_id, page_refs);
    Ok(output)
}

/// [`compose`] and serialize the result
pub fn compose_to_bytes(
    source: &Document,
    page_ids: &[ObjectId],
    plan: &LayoutPlan,
    sheet_width_pt: f32,
    sheet_height_pt: f32,
) -> Result<Vec<u8>> {
    let output = compose(source, page_ids, plan, sheet_width_pt, sheet_height_pt)?;
    super::io::save_pdf_bytes(output)
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
