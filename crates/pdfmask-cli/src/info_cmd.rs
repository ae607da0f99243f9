use std::path::Path;

use pdfmask_core::BBox;
use pdfmask_pdf::DocumentMetadata;

use crate::cli::TextFormat;
use crate::page_range::PageSelection;
use crate::shared::{bbox_to_json, open_pdf, print_json, resolve_pages};

fn format_bbox(b: &BBox) -> String {
    format!("[{:.2}, {:.2}, {:.2}, {:.2}]", b.x0, b.top, b.x1, b.bottom)
}

fn metadata_fields(metadata: &DocumentMetadata) -> Vec<(&'static str, &'static str, &str)> {
    [
        ("Title", "title", &metadata.title),
        ("Author", "author", &metadata.author),
        ("Subject", "subject", &metadata.subject),
        ("Creator", "creator", &metadata.creator),
        ("Producer", "producer", &metadata.producer),
        ("CreationDate", "creation_date", &metadata.creation_date),
        ("ModDate", "mod_date", &metadata.mod_date),
    ]
    .into_iter()
    .filter_map(|(label, key, value)| value.as_deref().map(|v| (label, key, v)))
    .collect()
}

pub fn run(file: &Path, pages: Option<&PageSelection>, format: &TextFormat) -> Result<(), i32> {
    let doc = open_pdf(file)?;
    let page_count = doc.page_count();
    let page_indices = resolve_pages(pages, page_count)?;
    let metadata = doc.metadata();

    let mut page_infos = Vec::with_capacity(page_indices.len());
    for &idx in &page_indices {
        let info = doc.page_info(idx).map_err(|e| {
            eprintln!("Error reading page {}: {e}", idx + 1);
            1
        })?;
        page_infos.push(info);
    }

    match format {
        TextFormat::Text => {
            for info in &page_infos {
                println!("Page {}:", info.index + 1);
                println!("  Dimensions: {:.2} x {:.2}", info.width, info.height);
                println!("  Rotation: {}", info.rotation);
                println!("  MediaBox: {}", format_bbox(&info.media_box));
                if let Some(ref cb) = info.crop_box {
                    println!("  CropBox: {}", format_bbox(cb));
                }
            }
            let fields = metadata_fields(&metadata);
            if !fields.is_empty() {
                println!();
                println!("Metadata:");
                for (label, _, value) in fields {
                    println!("  {label}: {value}");
                }
            }
            println!();
            println!("Pages: {page_count}");
        }
        TextFormat::Json => {
            let metadata_json: serde_json::Map<String, serde_json::Value> =
                metadata_fields(&metadata)
                    .into_iter()
                    .map(|(_, key, value)| (key.to_string(), serde_json::json!(value)))
                    .collect();
            let page_json: Vec<serde_json::Value> = page_infos
                .iter()
                .map(|info| {
                    let mut page = serde_json::json!({
                        "page": info.index + 1,
                        "width": info.width,
                        "height": info.height,
                        "rotation": info.rotation,
                        "media_box": bbox_to_json(&info.media_box),
                    });
                    if let Some(ref cb) = info.crop_box {
                        page["crop_box"] = bbox_to_json(cb);
                    }
                    page
                })
                .collect();
            print_json(&serde_json::json!({
                "metadata": metadata_json,
                "pages": page_count,
                "page_info": page_json,
            }))?;
        }
    }

    Ok(())
}
