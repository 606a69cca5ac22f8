//! XObject creation for imposition
//!
//! Source pages are wrapped as Form XObjects in the output document so they
//! can be drawn anywhere on an output page with a single `cm` + `Do`.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Guard against cyclic `/Parent` chains in malformed page trees
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// Objects already copied from the source into the output document
#[derive(Debug, Default)]
pub struct EmbedCache {
    /// Source object id -> output object id, for deep-copied objects
    objects: HashMap<ObjectId, ObjectId>,
    /// Source page id -> output XObject id
    pages: HashMap<ObjectId, ObjectId>,
}

impl EmbedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct source pages embedded so far
    pub fn embedded_pages(&self) -> usize {
        self.pages.len()
    }
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Create (or reuse) a Form XObject for a source page.
///
/// A page drawn in several slots is embedded once. The form's `Matrix`
/// moves the MediaBox origin to (0, 0) so placements can treat every page
/// as starting at the origin.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut EmbedCache,
) -> Result<ObjectId> {
    if let Some(&id) = cache.pages.get(&page_id) {
        return Ok(id);
    }

    let media_box = get_page_box(source, page_id)?;
    let page_dict = source.get_dictionary(page_id)?;
    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("FormType", Object::Integer(1));
    xobject_dict.set(
        "BBox",
        Object::Array(vec![
            Object::Real(media_box.x),
            Object::Real(media_box.y),
            Object::Real(media_box.right()),
            Object::Real(media_box.top()),
        ]),
    );
    xobject_dict.set(
        "Matrix",
        Object::Array(vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
            Object::Real(-media_box.x),
            Object::Real(-media_box.y),
        ]),
    );

    if let Some(resources) = resolve_inherited(source, page_id, b"Resources")? {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, &mut cache.objects)?,
        );
    }

    let xobject_id = output.add_object(Stream::new(xobject_dict, content_data));
    cache.pages.insert(page_id, xobject_id);
    log::trace!("Embedded source page {:?} as XObject {:?}", page_id, xobject_id);
    Ok(xobject_id)
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match contents {
        Object::Reference(id) => match doc.get_object(*id)? {
            Object::Array(arr) => get_concatenated_content_streams(doc, arr),
            obj => Ok(stream_bytes(obj)),
        },
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            result.extend_from_slice(&stream_bytes(doc.get_object(*id)?));
            result.push(b'\n');
        }
    }

    Ok(result)
}

/// Decoded stream content, or the raw bytes if the filter is unsupported
fn stream_bytes(obj: &Object) -> Vec<u8> {
    match obj.as_stream() {
        Ok(stream) => stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()),
        Err(_) => Vec::new(),
    }
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Uses a cache to avoid copying the same object multiple times.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            // Reserve the id first so reference cycles terminate
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        // Page tree links would drag the whole source document along
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

// =============================================================================
// Page Geometry
// =============================================================================

/// Source page MediaBox in points, inherited through the page tree.
///
/// Falls back to US Letter when no usable MediaBox is found.
pub fn get_page_box(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    let (default_w, default_h) = DEFAULT_PAGE_DIMENSIONS;
    let fallback = Rect::new(0.0, 0.0, default_w, default_h);

    let values: Option<Vec<f32>> = match resolve_inherited(doc, page_id, b"MediaBox")? {
        Some(obj) => resolve(doc, obj)?
            .as_array()
            .ok()
            .map(|arr| arr.iter().filter_map(|o| extract_number(doc, o)).collect()),
        None => None,
    };

    match values.as_deref() {
        Some([x0, y0, x1, y1]) => Ok(Rect::new(
            x0.min(*x1),
            y0.min(*y1),
            (x1 - x0).abs(),
            (y1 - y0).abs(),
        )),
        _ => Ok(fallback),
    }
}

/// Source page dimensions (width, height) in points
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let media_box = get_page_box(doc, page_id)?;
    Ok((media_box.width, media_box.height))
}

/// Look up a page attribute, walking up the page tree through `/Parent`
/// when the page itself does not define it.
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut current = doc.get_dictionary(page_id)?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Ok(Some(value));
        }
        match current.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => current = doc.get_dictionary(parent_id)?,
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

/// Follow a single level of indirection
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        _ => Ok(obj),
    }
}

/// Extract numeric value from a PDF object
fn extract_number(doc: &Document, obj: &Object) -> Option<f32> {
    match resolve(doc, obj).ok()? {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
