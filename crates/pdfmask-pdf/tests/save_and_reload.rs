//! Masking a page, writing it to disk and reading it back.

use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use pdfmask_core::BBox;
use pdfmask_pdf::{PdfBackendError, PdfDocument, Rgb};

fn two_page_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for label in ["P1", "P2"] {
        let content = format!("BT /F1 12 Tf 72 720 Td ({label}) Tj ET");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    // MediaBox is inherited from the page tree root.
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 2i64,
            "MediaBox" => vec![0.into(), 0.into(), 600.into(), 800.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

fn page_content(path: &std::path::Path, page_number: u32) -> String {
    let doc = Document::load(path).unwrap();
    let page_id = doc.get_pages()[&page_number];
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

#[test]
fn inherited_media_box_is_used() {
    let doc = PdfDocument::from_bytes(&two_page_pdf()).unwrap();
    assert_eq!(doc.page_count(), 2);
    let info = doc.page_info(1).unwrap();
    assert_eq!((info.width, info.height), (600.0, 800.0));
}

#[test]
fn masked_page_survives_save() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    let output = dir.path().join("out.pdf");
    std::fs::write(&input, two_page_pdf()).unwrap();

    let mut doc = PdfDocument::open(&input).unwrap();
    let covered = doc
        .mask_outside(0, &[BBox::new(100.0, 100.0, 300.0, 300.0)], Rgb::WHITE)
        .unwrap();
    assert_eq!(covered.len(), 4);
    doc.save(&output).unwrap();

    let first = page_content(&output, 1);
    assert!(first.contains("(P1) Tj"), "original text stays: {first}");
    assert!(first.contains("1 1 1 rg"));
    assert_eq!(first.matches(" re").count(), 4);

    let second = page_content(&output, 2);
    assert!(!second.contains(" re"), "other pages untouched: {second}");
}

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PdfDocument::open(dir.path().join("missing.pdf"))
        .err()
        .unwrap();
    assert!(matches!(err, PdfBackendError::Io(_)));
}
