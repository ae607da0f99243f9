use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("pdfmask").unwrap()
}

/// Single 612x792 page rotated by `rotation`, with a line as content.
fn rotated_pdf(rotation: i64) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");
    let content_id = doc.add_object(Stream::new(dictionary! {}, b"0 0 m 612 792 l S".to_vec()));
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => Object::Reference(content_id),
        "Rotate" => rotation,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn first_page_content(path: &std::path::Path) -> String {
    let doc = lopdf::Document::load(path).unwrap();
    let page_id = doc.get_pages()[&1];
    String::from_utf8_lossy(&doc.get_page_content(page_id).unwrap()).into_owned()
}

#[test]
fn mark_draws_outline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plan.pdf");
    std::fs::write(&input, rotated_pdf(0)).unwrap();

    cmd()
        .arg("mark")
        .arg(&input)
        .args(["--keep", "72,72,144,108", "--color", "255,0,0", "--line-width", "1.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 1 region(s)"));

    let content = first_page_content(&dir.path().join("plan_marked.pdf"));
    assert!(content.contains("1 0 0 RG"));
    assert!(content.contains("1.5 w"));
    assert!(content.contains("72 684 72 36 re"), "{content}");
    assert!(content.contains('S'));
}

#[test]
fn mark_on_rotated_page_maps_to_native_space() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plan.pdf");
    let output = dir.path().join("marked.pdf");
    std::fs::write(&input, rotated_pdf(90)).unwrap();

    cmd()
        .arg("mark")
        .arg(&input)
        .args(["--keep", "0,0,100,50", "-o"])
        .arg(&output)
        .assert()
        .success();

    // Top-left of a page rotated 90° is the native bottom-left corner.
    assert!(first_page_content(&output).contains("0 0 50 100 re"));
}

#[test]
fn mark_requires_a_region() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plan.pdf");
    std::fs::write(&input, rotated_pdf(0)).unwrap();
    cmd()
        .arg("mark")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one --keep or --detector"));
}

#[test]
fn mark_rejects_bad_color() {
    cmd()
        .args(["mark", "plan.pdf", "--keep", "0,0,1,1", "--color", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid color"));
}
