use std::fs;
use std::path::Path;

use pdfmask_core::{BBox, DrawStyle, SvgOptions, SvgRenderer};
use pdfplumber::WordOptions;

use crate::cli::{ElementKind, OutputFormat};
use crate::page_range::PageSelection;
use crate::shared::{csv_escape, extract_page, open_extractor, print_json, resolve_pages};

/// One box found on a page.
#[derive(Debug, Clone, PartialEq)]
struct Element {
    page: usize,
    kind: ElementKind,
    bbox: BBox,
    /// Word text, drawing shape, image name, annotation subtype or link URI.
    detail: String,
}

fn outline_color(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Words => "#ff0000",
        ElementKind::Drawings => "#0000ff",
        ElementKind::Images => "#ff8c00",
        ElementKind::Annots => "#008000",
        ElementKind::Links => "#800080",
    }
}

fn collect(page: &pdfplumber::Page, number: usize, kinds: &[ElementKind]) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut push = |kind: ElementKind, x0: f64, top: f64, x1: f64, bottom: f64, detail: &str| {
        elements.push(Element {
            page: number,
            kind,
            bbox: BBox::from_corners(x0, top, x1, bottom),
            detail: detail.to_string(),
        });
    };

    for &kind in kinds {
        match kind {
            ElementKind::Words => {
                for w in page.extract_words(&WordOptions::default()) {
                    push(kind, w.bbox.x0, w.bbox.top, w.bbox.x1, w.bbox.bottom, &w.text);
                }
            }
            ElementKind::Drawings => {
                for l in page.lines() {
                    push(kind, l.x0, l.top, l.x1, l.bottom, "line");
                }
                for r in page.rects() {
                    push(kind, r.x0, r.top, r.x1, r.bottom, "rect");
                }
            }
            ElementKind::Images => {
                for img in page.images() {
                    push(kind, img.x0, img.top, img.x1, img.bottom, &img.name);
                }
            }
            ElementKind::Annots => {
                for a in page.annots() {
                    push(kind, a.bbox.x0, a.bbox.top, a.bbox.x1, a.bbox.bottom, &a.raw_subtype);
                }
            }
            ElementKind::Links => {
                for link in page.hyperlinks() {
                    let b = &link.bbox;
                    push(kind, b.x0, b.top, b.x1, b.bottom, &link.uri);
                }
            }
        }
    }
    elements
}

fn render_svg(width: f64, height: f64, elements: &[Element]) -> String {
    let mut renderer = SvgRenderer::new(width, height);
    for kind in ElementKind::ALL {
        let boxes: Vec<BBox> = elements
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.bbox)
            .collect();
        renderer.draw_regions(&boxes, &DrawStyle::outline(outline_color(kind)));
    }
    renderer.to_svg(&SvgOptions::default())
}

pub fn run(
    file: &Path,
    pages: Option<&PageSelection>,
    kinds: &[ElementKind],
    format: &OutputFormat,
    svg_dir: Option<&Path>,
) -> Result<(), i32> {
    let pdf = open_extractor(file)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;
    let kinds = if kinds.is_empty() {
        &ElementKind::ALL[..]
    } else {
        kinds
    };

    if let Some(dir) = svg_dir {
        fs::create_dir_all(dir).map_err(|e| {
            eprintln!("Error: cannot create {}: {e}", dir.display());
            1
        })?;
    }

    let mut all = Vec::new();
    for &idx in &page_indices {
        let page = extract_page(&pdf, idx)?;
        let elements = collect(&page, idx + 1, kinds);
        if let Some(dir) = svg_dir {
            let path = dir.join(format!("page_{}.svg", idx + 1));
            let svg = render_svg(page.width(), page.height(), &elements);
            fs::write(&path, svg).map_err(|e| {
                eprintln!("Error: failed to write {}: {e}", path.display());
                1
            })?;
            tracing::debug!(path = %path.display(), elements = elements.len(), "wrote element outline");
        }
        all.extend(elements);
    }

    match format {
        OutputFormat::Text => {
            println!("page\tkind\tx0\ttop\tx1\tbottom\tdetail");
            for e in &all {
                println!(
                    "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}",
                    e.page,
                    e.kind.name(),
                    e.bbox.x0,
                    e.bbox.top,
                    e.bbox.x1,
                    e.bbox.bottom,
                    e.detail,
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = all
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "page": e.page,
                        "kind": e.kind.name(),
                        "x0": e.bbox.x0,
                        "top": e.bbox.top,
                        "x1": e.bbox.x1,
                        "bottom": e.bbox.bottom,
                        "detail": e.detail,
                    })
                })
                .collect();
            print_json(&serde_json::Value::Array(rows))?;
        }
        OutputFormat::Csv => {
            println!("page,kind,x0,top,x1,bottom,detail");
            for e in &all {
                println!(
                    "{},{},{},{},{},{},{}",
                    e.page,
                    e.kind.name(),
                    e.bbox.x0,
                    e.bbox.top,
                    e.bbox.x1,
                    e.bbox.bottom,
                    csv_escape(&e.detail),
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(kind: ElementKind, x0: f64) -> Element {
        Element {
            page: 1,
            kind,
            bbox: BBox::new(x0, 10.0, x0 + 20.0, 30.0),
            detail: String::new(),
        }
    }

    #[test]
    fn svg_colors_each_kind() {
        let svg = render_svg(
            200.0,
            100.0,
            &[
                element(ElementKind::Words, 0.0),
                element(ElementKind::Links, 50.0),
            ],
        );
        assert!(svg.contains("viewBox=\"0 0 200 100\""));
        assert!(svg.contains("x=\"0\" y=\"10\" width=\"20\" height=\"20\" fill=\"none\" stroke=\"#ff0000\""));
        assert!(svg.contains("stroke=\"#800080\""));
        assert!(!svg.contains("#0000ff"));
    }
}
