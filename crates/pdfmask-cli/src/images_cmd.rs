use std::fs;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::page_range::PageSelection;
use crate::shared::{csv_escape, extract_page, open_extractor, print_json, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&PageSelection>,
    format: &OutputFormat,
    extract: bool,
    output_dir: Option<&Path>,
) -> Result<(), i32> {
    let pdf = open_extractor(file)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;

    if extract {
        return run_extract(&pdf, &page_indices, output_dir.unwrap_or(Path::new(".")));
    }
    match format {
        OutputFormat::Text => write_text(&pdf, &page_indices),
        OutputFormat::Json => write_json(&pdf, &page_indices),
        OutputFormat::Csv => write_csv(&pdf, &page_indices),
    }
}

fn write_text(pdf: &pdfplumber::Pdf, page_indices: &[usize]) -> Result<(), i32> {
    println!("page\tname\tx0\ttop\tx1\tbottom\tpixels");
    for &idx in page_indices {
        let page = extract_page(pdf, idx)?;
        for img in page.images() {
            let pixels = match (img.src_width, img.src_height) {
                (Some(w), Some(h)) => format!("{w}x{h}"),
                _ => "-".to_string(),
            };
            println!(
                "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{pixels}",
                idx + 1,
                img.name,
                img.x0,
                img.top,
                img.x1,
                img.bottom,
            );
        }
    }
    Ok(())
}

fn write_json(pdf: &pdfplumber::Pdf, page_indices: &[usize]) -> Result<(), i32> {
    let mut images = Vec::new();
    for &idx in page_indices {
        let page = extract_page(pdf, idx)?;
        for img in page.images() {
            images.push(serde_json::json!({
                "page": idx + 1,
                "name": img.name,
                "x0": img.x0,
                "top": img.top,
                "x1": img.x1,
                "bottom": img.bottom,
                "src_width": img.src_width,
                "src_height": img.src_height,
                "color_space": img.color_space,
            }));
        }
    }
    print_json(&serde_json::Value::Array(images))
}

fn write_csv(pdf: &pdfplumber::Pdf, page_indices: &[usize]) -> Result<(), i32> {
    println!("page,name,x0,top,x1,bottom,src_width,src_height");
    for &idx in page_indices {
        let page = extract_page(pdf, idx)?;
        for img in page.images() {
            println!(
                "{},{},{},{},{},{},{},{}",
                idx + 1,
                csv_escape(&img.name),
                img.x0,
                img.top,
                img.x1,
                img.bottom,
                img.src_width.map_or(String::new(), |w| w.to_string()),
                img.src_height.map_or(String::new(), |h| h.to_string()),
            );
        }
    }
    Ok(())
}

/// `image_page<N>_<I>.<ext>`, with `I` counting from 1 on each page.
fn image_file_name(page: usize, index: usize, extension: &str) -> String {
    format!("image_page{page}_{index}.{extension}")
}

fn run_extract(pdf: &pdfplumber::Pdf, page_indices: &[usize], dir: &Path) -> Result<(), i32> {
    fs::create_dir_all(dir).map_err(|e| {
        eprintln!("Error: cannot create {}: {e}", dir.display());
        1
    })?;

    let mut count = 0;
    for &idx in page_indices {
        let pairs = pdf.extract_images_with_content(idx).map_err(|e| {
            eprintln!("Error extracting images from page {}: {e}", idx + 1);
            1
        })?;
        for (i, (_, content)) in pairs.iter().enumerate() {
            let path = dir.join(image_file_name(idx + 1, i + 1, content.format.extension()));
            fs::write(&path, &content.data).map_err(|e| {
                eprintln!("Error: failed to write {}: {e}", path.display());
                1
            })?;
            tracing::debug!(path = %path.display(), bytes = content.data.len(), "wrote image");
            count += 1;
        }
    }

    if count == 0 {
        println!("No images found.");
    } else {
        println!("Extracted {count} image(s) to {}", dir.display());
    }
    Ok(())
}
