use std::path::Path;

use pdfplumber::TextOptions;

use crate::cli::TextFormat;
use crate::page_range::PageSelection;
use crate::shared::{extract_page, open_extractor, print_json, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&PageSelection>,
    layout: bool,
    format: &TextFormat,
) -> Result<(), i32> {
    let pdf = open_extractor(file)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;
    let options = TextOptions {
        layout,
        ..TextOptions::default()
    };

    let mut exported = Vec::with_capacity(page_indices.len());
    for &idx in &page_indices {
        let page = extract_page(&pdf, idx)?;
        let text = page.extract_text(&options);
        match format {
            TextFormat::Text => {
                println!("--- Page {} ---", idx + 1);
                println!("{text}");
            }
            TextFormat::Json => exported.push(serde_json::json!({
                "page": idx + 1,
                "text": text,
            })),
        }
    }

    if matches!(format, TextFormat::Json) {
        print_json(&serde_json::Value::Array(exported))?;
    }
    Ok(())
}
