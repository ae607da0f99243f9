use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("pdfmask").unwrap()
}

/// Build a PDF with one page per entry of `rotations`, optionally with
/// a CropBox and an /Info dictionary.
fn pdf_with_pages(rotations: &[i64], crop: bool, title: Option<&str>) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &rotation in rotations {
        let content_id = doc.add_object(Stream::new(dictionary! {}, b"0 0 m 10 10 l S".to_vec()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => Object::Reference(content_id),
            "Rotate" => rotation,
        };
        if crop {
            page.set("CropBox", vec![36.into(), 36.into(), 576.into(), 756.into()]);
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => rotations.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn info_text_lists_pages_and_metadata() {
    let file = write_temp_pdf(&pdf_with_pages(&[0, 90], false, Some("Ground floor")));
    cmd()
        .arg("info")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1:"))
        .stdout(predicate::str::contains("Dimensions: 612.00 x 792.00"))
        .stdout(predicate::str::contains("Page 2:"))
        .stdout(predicate::str::contains("Dimensions: 792.00 x 612.00"))
        .stdout(predicate::str::contains("Rotation: 90"))
        .stdout(predicate::str::contains("Title: Ground floor"))
        .stdout(predicate::str::contains("Pages: 2"));
}

#[test]
fn info_json_with_crop_box() {
    let file = write_temp_pdf(&pdf_with_pages(&[0], true, None));
    let output = cmd()
        .arg("info")
        .arg(file.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["pages"], 1);
    let page = &json["page_info"][0];
    assert_eq!(page["width"], 540.0);
    assert_eq!(page["height"], 720.0);
    assert_eq!(page["crop_box"], serde_json::json!([36.0, 36.0, 576.0, 756.0]));
    assert_eq!(json["metadata"], serde_json::json!({}));
}

#[test]
fn info_pages_option_filters() {
    let file = write_temp_pdf(&pdf_with_pages(&[0, 0, 0], false, None));
    let output = cmd()
        .arg("info")
        .arg(file.path())
        .args(["--pages", "2-3", "--format", "json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let pages: Vec<u64> = json["page_info"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["page"].as_u64().unwrap())
        .collect();
    assert_eq!(pages, vec![2, 3]);
}

#[test]
fn info_page_out_of_range() {
    let file = write_temp_pdf(&pdf_with_pages(&[0], false, None));
    cmd()
        .arg("info")
        .arg(file.path())
        .args(["--pages", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds document page count"));
}

#[test]
fn info_file_not_found() {
    cmd()
        .args(["info", "/nonexistent/plan.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: file not found"));
}

#[test]
fn info_not_a_pdf() {
    let file = write_temp_pdf(b"definitely not a pdf");
    cmd()
        .arg("info")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: failed to open PDF"));
}

#[test]
fn scale_reads_page_size_from_file() {
    let file = write_temp_pdf(&pdf_with_pages(&[0, 90], false, None));
    cmd()
        .args(["scale", "--image-size", "1584x1224", "--file"])
        .arg(file.path())
        .args(["--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scale: 2.0000"));
}
