//! Output page rendering for imposition

use crate::layout::{FaceLayout, Placement, fit};
use crate::types::{ImposeError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::xobject::{EmbedCache, create_page_xobject, get_page_dimensions};

/// Output page geometry shared by every face of one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
}

/// Render one face of an output sheet and return the new page's id.
///
/// Each occupied slot draws its source page fitted into the slot; blank
/// slots draw nothing. The page is added to the document but not yet linked
/// into a page tree.
pub fn render_face(
    output: &mut Document,
    source: &Document,
    source_page_ids: &[ObjectId],
    layout: &FaceLayout,
    geometry: SheetGeometry,
    parent_pages_id: ObjectId,
    cache: &mut EmbedCache,
) -> Result<ObjectId> {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(geometry.width_pt),
            Object::Real(geometry.height_pt),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for (slot, assignment) in layout.slots() {
        let Some(source_idx) = assignment.source_page else {
            continue;
        };
        let &source_page_id =
            source_page_ids
                .get(source_idx)
                .ok_or(ImposeError::PageOutOfRange {
                    index: source_idx,
                    page_count: source_page_ids.len(),
                })?;

        let (src_width, src_height) = get_page_dimensions(source, source_page_id)?;
        let target = slot.bounds(geometry.width_pt, geometry.height_pt);
        let placement = fit(src_width, src_height, &target).with_rotation(assignment.rotated);

        let xobject_name = format!("P{}", source_idx);
        let xobject_id = create_page_xobject(output, source, source_page_id, cache)?;
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

        log::trace!(
            "{:?} {:?}: page {} at ({:.2}, {:.2}) scale {:.4}{}",
            layout.face,
            slot,
            source_idx,
            placement.x,
            placement.y,
            placement.scale,
            if placement.rotated { " rotated" } else { "" }
        );
        content_ops.push(generate_placement_command(&xobject_name, &placement));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Generate the PDF content stream command to place a page.
///
/// `cm` rotates around the insertion point, so the 180° case relies on the
/// placement's far-corner anchor.
pub fn generate_placement_command(xobject_name: &str, placement: &Placement) -> String {
    let [a, b, c, d, e, f] = placement.transform();
    format!(
        "q {} {} {} {} {} {} cm /{} Do Q\n",
        a, b, c, d, e, f, xobject_name
    )
}
