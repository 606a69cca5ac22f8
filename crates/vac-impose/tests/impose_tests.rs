use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use vac_impose::*;

const A5_WIDTH: f32 = 420.945;
const A5_HEIGHT: f32 = 595.28;

fn create_test_pdf(num_pages: usize, width: f32, height: f32) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for n in 0..num_pages {
        let content = format!("BT /F1 12 Tf 20 20 Td (page {}) Tj ET", n + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width),
                    Object::Real(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn create_a5_pdf(num_pages: usize) -> Document {
    create_test_pdf(num_pages, A5_WIDTH, A5_HEIGHT)
}

fn to_bytes(mut doc: Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Decoded content stream of an output page
fn page_content(doc: &Document, page_id: ObjectId) -> String {
    String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap()
}

fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| match o {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            _ => panic!("non-numeric MediaBox entry"),
        })
        .collect()
}

/// `(cm operands, XObject name)` for every placement on a page
fn placement_ops(content: &str) -> Vec<(Vec<f32>, String)> {
    content
        .lines()
        .filter(|line| line.ends_with("Do Q"))
        .map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let operands = tokens[1..7].iter().map(|t| t.parse().unwrap()).collect();
            (operands, tokens[8].trim_start_matches('/').to_string())
        })
        .collect()
}

fn draw_count(content: &str) -> usize {
    content.matches(" Do Q").count()
}

#[test]
fn test_booklet_eight_pages_produces_two_sheets() {
    let source = create_a5_pdf(8);
    let output = impose_document(&source, &ImpositionOptions::default()).unwrap();

    let pages = page_ids(&output);
    assert_eq!(pages.len(), 4);
    for &id in &pages {
        assert_eq!(draw_count(&page_content(&output, id)), 2);
    }
}

#[test]
fn test_booklet_output_pages_are_a4_landscape() {
    let source = create_a5_pdf(4);
    let output = impose_document(&source, &ImpositionOptions::default()).unwrap();

    for id in page_ids(&output) {
        let mb = media_box(&output, id);
        assert!((mb[2] - 841.89).abs() < 0.1, "width was {}", mb[2]);
        assert!((mb[3] - 595.28).abs() < 0.1, "height was {}", mb[3]);
    }
}

#[test]
fn test_booklet_verso_is_drawn_rotated() {
    let source = create_a5_pdf(4);
    let output = impose_document(&source, &ImpositionOptions::default()).unwrap();
    let pages = page_ids(&output);

    let recto = page_content(&output, pages[0]);
    let verso = page_content(&output, pages[1]);

    assert!(!recto.contains("q -"), "recto should be upright: {}", recto);
    assert_eq!(verso.matches("q -").count(), 2, "verso: {}", verso);
}

#[test]
fn test_booklet_recto_places_last_page_left() {
    let source = create_a5_pdf(4);
    let output = impose_document(&source, &ImpositionOptions::default()).unwrap();
    let recto_id = page_ids(&output)[0];
    let half = media_box(&output, recto_id)[2] / 2.0;

    // Page 4 (index 3) in the left half, page 1 (index 0) in the right half
    let ops = placement_ops(&page_content(&output, recto_id));
    assert_eq!(ops.len(), 2);
    let x_of = |name: &str| ops.iter().find(|(_, n)| n == name).unwrap().0[4];

    let left = x_of("P3");
    let right = x_of("P0");
    assert!(left < half, "P3 at x = {} should be left of {}", left, half);
    assert!(right >= half - 0.01, "P0 at x = {} should be right of {}", right, half);
}

#[test]
fn test_booklet_odd_count_duplicates_middle_page() {
    let source = create_a5_pdf(5);
    let output = impose_document(&source, &ImpositionOptions::default()).unwrap();
    let pages = page_ids(&output);

    assert_eq!(pages.len(), 4);
    let last_recto = page_content(&output, pages[2]);
    assert_eq!(last_recto.matches("/P2 Do").count(), 2);
    assert_eq!(draw_count(&page_content(&output, pages[3])), 0);
}

#[test]
fn test_cut_one_page_per_output_page() {
    let source = create_a5_pdf(4);
    let output = impose_document(&source, &ImpositionOptions::new(PrintMode::Cut)).unwrap();
    let pages = page_ids(&output);

    assert_eq!(pages.len(), 4);
    let expected = ["/P0 Do", "/P3 Do", "/P1 Do", "/P2 Do"];
    for (k, (&id, name)) in pages.iter().zip(expected).enumerate() {
        let content = page_content(&output, id);
        assert_eq!(draw_count(&content), 1);
        assert!(content.contains(name), "page {}: {}", k, content);
        assert_eq!(content.contains("q -"), k % 2 == 1);
    }
}

#[test]
fn test_cut_first_page_sits_in_right_half() {
    let source = create_a5_pdf(2);
    let output = impose_document(&source, &ImpositionOptions::new(PrintMode::Cut)).unwrap();
    let pages = page_ids(&output);
    let half = media_box(&output, pages[0])[2] / 2.0;

    let (front, name) = placement_ops(&page_content(&output, pages[0])).remove(0);
    assert_eq!(name, "P0");
    assert!(front[4] >= half - 0.01, "x = {} should be right of {}", front[4], half);

    // Back page: tail page in the left half, anchored at its far corner
    let (back, name) = placement_ops(&page_content(&output, pages[1])).remove(0);
    assert_eq!(name, "P1");
    assert!(back[0] < 0.0);
    assert!((back[4] - half).abs() < 0.01, "anchor x = {}", back[4]);
}

#[test]
fn test_empty_source_yields_empty_document() {
    for mode in [PrintMode::Booklet, PrintMode::Cut] {
        let source = create_a5_pdf(0);
        let output = impose_document(&source, &ImpositionOptions::new(mode)).unwrap();
        assert_eq!(output.get_pages().len(), 0);
    }
}

#[test]
fn test_impose_bytes_round_trip() {
    let bytes = to_bytes(create_a5_pdf(6));
    let imposed = impose_bytes(&bytes, PrintMode::Booklet).unwrap();

    assert!(imposed.starts_with(b"%PDF-"));
    let reloaded = Document::load_mem(&imposed).unwrap();
    assert_eq!(reloaded.get_pages().len(), 4);
}

#[test]
fn test_impose_bytes_rejects_garbage() {
    let result = impose_bytes(b"not a pdf", PrintMode::Cut);
    assert!(matches!(result, Err(ImposeError::Pdf(_))));
}

#[test]
fn test_source_page_embedded_once() {
    let source = create_a5_pdf(1);
    let output = impose_document(&source, &ImpositionOptions::default()).unwrap();

    let forms = output
        .objects
        .values()
        .filter(|obj| {
            obj.as_stream()
                .ok()
                .and_then(|s| s.dict.get(b"Subtype").ok())
                .and_then(|s| s.as_name().ok())
                == Some(b"Form".as_slice())
        })
        .count();
    assert_eq!(forms, 1);
}

#[test]
fn test_letter_source_scaled_into_slot() {
    let source = create_test_pdf(2, 612.0, 792.0);
    let output = impose_document(&source, &ImpositionOptions::default()).unwrap();
    let recto = page_content(&output, page_ids(&output)[0]);

    // Width-limited: 841.89 / 2 / 612 ≈ 0.6878
    assert!(recto.contains("q 0.687"), "{}", recto);
}

#[test]
fn test_match_source_sheet_size() {
    let source = create_test_pdf(4, 300.0, 400.0);
    let options = ImpositionOptions {
        mode: PrintMode::Booklet,
        sheet: SheetSize::MatchSource,
    };
    let output = impose_document(&source, &options).unwrap();

    let mb = media_box(&output, page_ids(&output)[0]);
    assert_eq!(mb[2], 600.0);
    assert_eq!(mb[3], 400.0);
}

#[test]
fn test_compose_rejects_out_of_range_plan() {
    let source = create_a5_pdf(2);
    let plan = plan_layout(4, PrintMode::Booklet);

    let result = compose(&source, &page_ids(&source), &plan, 841.89, 595.28);
    match result {
        Err(ImposeError::PageOutOfRange { index, page_count }) => {
            assert_eq!(index, 3);
            assert_eq!(page_count, 2);
        }
        other => panic!("Expected PageOutOfRange, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_compose_to_bytes_empty_plan() {
    let source = create_a5_pdf(0);
    let plan = plan_layout(0, PrintMode::Cut);
    let bytes = compose_to_bytes(&source, &[], &plan, 841.89, 595.28).unwrap();

    let reloaded = Document::load_mem(&bytes).unwrap();
    assert_eq!(reloaded.get_pages().len(), 0);
}

#[test]
fn test_inherited_media_box_and_resources() {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
    let page_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        ("Contents", Object::Reference(content_id)),
    ]));
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(200),
                Object::Integer(100),
            ]),
        ),
        (
            "Resources",
            Object::Dictionary(Dictionary::from_iter(vec![(
                "Font",
                Object::Dictionary(Dictionary::from_iter(vec![(
                    "F1",
                    Object::Reference(font_id),
                )])),
            )])),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    assert_eq!(
        render::get_page_dimensions(&doc, page_id).unwrap(),
        (200.0, 100.0)
    );

    let output = impose_document(&doc, &ImpositionOptions::default()).unwrap();
    let form = output
        .objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .find(|s| s.dict.get(b"Subtype").and_then(|o| o.as_name()).ok() == Some(b"Form".as_slice()))
        .expect("form xobject");
    assert!(form.dict.get(b"Resources").is_ok());
}

#[tokio::test]
async fn test_load_impose_save() {
    use tempfile::NamedTempFile;

    let input = NamedTempFile::new().unwrap();
    std::fs::write(input.path(), to_bytes(create_a5_pdf(8))).unwrap();

    let loaded = load_pdf(input.path()).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 8);

    let imposed = impose(loaded, ImpositionOptions::new(PrintMode::Cut))
        .await
        .unwrap();

    let output = NamedTempFile::new().unwrap();
    save_pdf(imposed, output.path()).await.unwrap();

    let reloaded = load_pdf(output.path()).await.unwrap();
    assert_eq!(reloaded.get_pages().len(), 8);
}

#[tokio::test]
async fn test_impose_rejects_invalid_options() {
    let options = ImpositionOptions {
        mode: PrintMode::Booklet,
        sheet: SheetSize::Paper {
            size: PaperSize::Custom {
                width_mm: 0.0,
                height_mm: 210.0,
            },
            orientation: Orientation::Landscape,
        },
    };
    let result = impose(create_a5_pdf(2), options).await;
    assert!(matches!(result, Err(ImposeError::Config(_))));
}
