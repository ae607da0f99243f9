use std::path::{Path, PathBuf};

use pdfmask_core::{
    BBox, CountOptions, DetectionSet, DrawStyle, LabelCount, PageDetections, SvgOptions,
    SvgRenderer, count_words, subtract_many,
};

use crate::cli::{OutputFormat, RegionArgs, Size};
use crate::page_range::PageSelection;
use crate::shared::{RegionResolver, csv_escape, print_json};
use crate::word_source;

/// Everything the `count` subcommand was asked to do.
pub struct CountRequest<'a> {
    pub input: &'a Path,
    pub regions: &'a RegionArgs,
    pub page_size: Option<Size>,
    pub label: Option<&'a str>,
    pub threshold: f64,
    pub pages: Option<&'a PageSelection>,
    pub format: &'a OutputFormat,
    pub preview: Option<&'a Path>,
    pub preview_zoom: f64,
}

/// One counted page with the size and regions it was counted against.
struct CountedPage {
    size: Option<Size>,
    regions: Vec<BBox>,
    result: PageDetections,
}

pub fn run(request: &CountRequest<'_>) -> Result<(), i32> {
    let inputs = word_source::load(request.input, request.pages)?;
    let options = CountOptions {
        threshold: request.threshold,
        label_filter: request.label.map(str::to_string),
    };

    let mut resolver = RegionResolver::new(request.regions);
    let mut counted = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let size = request.page_size.or(input.size);
        let regions = resolver.regions(size)?.to_vec();
        let detections = count_words(&input.words, &regions, &options);
        tracing::debug!(page = input.page, words = input.words.len(), "counted words");
        counted.push(CountedPage {
            size,
            regions,
            result: PageDetections {
                page: input.page,
                detections,
            },
        });
    }

    let sizes_known = if counted.is_empty() {
        request.page_size.is_some()
    } else {
        counted.iter().all(|p| p.size.is_some())
    };
    if request.preview.is_some() && !sizes_known {
        eprintln!("Error: --preview needs the page size (--page-size or a PDF input)");
        return Err(1);
    }

    let pages: Vec<PageDetections> = counted.iter().map(|p| p.result.clone()).collect();
    let totals = total_counts(&pages);
    match request.format {
        OutputFormat::Text => write_text(&pages, &totals),
        OutputFormat::Json => write_json(&pages, &totals)?,
        OutputFormat::Csv => write_csv(&totals),
    }

    if let Some(preview) = request.preview {
        if counted.is_empty() {
            // Nothing counted: still show the page and its regions.
            counted.push(CountedPage {
                size: request.page_size,
                regions: resolver.regions(request.page_size)?.to_vec(),
                result: PageDetections {
                    page: 1,
                    detections: DetectionSet::new(),
                },
            });
        }
        write_previews(preview, &counted, request.preview_zoom)?;
    }
    Ok(())
}

/// Sum per-page counts by label, keeping first-seen label order.
fn total_counts(pages: &[PageDetections]) -> Vec<LabelCount> {
    let mut totals: Vec<LabelCount> = Vec::new();
    for page in pages {
        for count in page.detections.counts() {
            match totals.iter_mut().find(|t| t.label == count.label) {
                Some(total) => total.count += count.count,
                None => totals.push(count),
            }
        }
    }
    totals
}

fn write_text(pages: &[PageDetections], totals: &[LabelCount]) {
    println!("Element\tCount");
    for t in totals {
        println!("{}\t{}", t.label, t.count);
    }
    println!();
    if pages.len() > 1 {
        for page in pages {
            println!("Page {}\t{}", page.page, page.detections.total());
        }
    }
    println!("Total: {}", totals.iter().map(|t| t.count).sum::<usize>());
}

fn write_csv(totals: &[LabelCount]) {
    println!("Element,Count");
    for t in totals {
        println!("{},{}", csv_escape(&t.label), t.count);
    }
}

fn write_json(pages: &[PageDetections], totals: &[LabelCount]) -> Result<(), i32> {
    let pages_json: Vec<serde_json::Value> = pages
        .iter()
        .map(|p| {
            serde_json::json!({
                "page": p.page,
                "counts": p.detections.counts(),
                "total": p.detections.total(),
            })
        })
        .collect();
    print_json(&serde_json::json!({
        "counts": totals,
        "total": totals.iter().map(|t| t.count).sum::<usize>(),
        "pages": pages_json,
    }))
}

/// `plan.svg` stays as is for a single page, page 3 of many becomes `plan-p3.svg`.
fn preview_path(base: &Path, page: usize, many: bool) -> PathBuf {
    if !many {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}-p{page}.{}", ext.to_string_lossy()),
        None => format!("{stem}-p{page}"),
    };
    base.with_file_name(name)
}

fn render_preview(size: Size, regions: &[BBox], detections: &DetectionSet, zoom: f64) -> String {
    let mut renderer = SvgRenderer::new(size.width, size.height);
    if !regions.is_empty() {
        let page = BBox::new(0.0, 0.0, size.width, size.height);
        renderer.draw_regions(&subtract_many(&page, regions), &DrawStyle::covered_default());
        renderer.draw_regions(regions, &DrawStyle::kept_default());
    }
    renderer.draw_detections(detections);
    renderer.to_svg(&SvgOptions {
        scale: zoom,
        ..SvgOptions::default()
    })
}

fn write_previews(base: &Path, pages: &[CountedPage], zoom: f64) -> Result<(), i32> {
    let many = pages.len() > 1;
    for page in pages {
        let Some(size) = page.size else {
            continue;
        };
        let path = preview_path(base, page.result.page, many);
        let svg = render_preview(size, &page.regions, &page.result.detections, zoom);
        write_svg(&path, &svg, page.result.page)?;
    }
    Ok(())
}

fn write_svg(path: &Path, svg: &str, page: usize) -> Result<(), i32> {
    std::fs::write(path, svg).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", path.display());
        1
    })?;
    tracing::debug!(path = %path.display(), page, "wrote preview");
    Ok(())
}
