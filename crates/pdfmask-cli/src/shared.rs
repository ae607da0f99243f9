use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use pdfmask_core::{BBox, ScaleOptions, Word, estimate_scale, to_point_space};
use pdfmask_pdf::PdfDocument;
use tracing_subscriber::EnvFilter;

use crate::cli::{PageSource, RegionArgs, Size};
use crate::page_range::PageSelection;

/// Install the stderr log subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, defaulting to
/// `error` so that warnings reach the user once, as `Warning:` lines.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a valid PDF.
pub fn open_pdf(file: &Path) -> Result<PdfDocument, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    PdfDocument::open(file).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Open a PDF for text and element extraction.
pub fn open_extractor(file: &Path) -> Result<pdfplumber::Pdf, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    pdfplumber::Pdf::open_file(file, None).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Interpret the 0-based page `index` of an extraction document.
pub fn extract_page(pdf: &pdfplumber::Pdf, index: usize) -> Result<pdfplumber::Page, i32> {
    pdf.page(index).map_err(|e| {
        eprintln!("Error reading page {}: {e}", index + 1);
        1
    })
}

/// Visible size of the 0-based page `index`.
pub fn page_size(doc: &PdfDocument, index: usize) -> Result<Size, i32> {
    let info = doc.page_info(index).map_err(|e| {
        eprintln!("Error reading page {}: {e}", index + 1);
        1
    })?;
    Ok(Size {
        width: info.width,
        height: info.height,
    })
}

/// Page size from `--page-size`, or from `--page` of `--file`.
pub fn resolve_page_size(source: &PageSource) -> Result<Size, i32> {
    if let Some(size) = source.page_size {
        return Ok(size);
    }
    let Some(file) = source.file.as_deref() else {
        eprintln!("Error: either --page-size or --file is required");
        return Err(1);
    };
    let doc = open_pdf(file)?;
    let index = resolve_page(Some(source.page), doc.page_count())?;
    page_size(&doc, index[0])
}

/// 0-based indices for an optional 1-based `--page`; `None` selects every page.
pub fn resolve_page(page: Option<usize>, page_count: usize) -> Result<Vec<usize>, i32> {
    match page {
        Some(page) => PageSelection::single(page)
            .and_then(|sel| sel.resolve(page_count))
            .map_err(|e| {
                eprintln!("Error: {e}");
                1
            }),
        None => Ok((0..page_count).collect()),
    }
}

/// Resolve an optional page selection into 0-indexed page indices.
pub fn resolve_pages(pages: Option<&PageSelection>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(sel) => sel.resolve(page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Pixels per point for the region arguments on a page of `page` size.
///
/// Without `--zoom` or `--image-size` the boxes are already in points.
pub fn region_scale(args: &RegionArgs, page: Option<Size>) -> Result<f64, i32> {
    if let Some(zoom) = args.zoom {
        return Ok(zoom);
    }
    let Some(image) = args.image_size else {
        return Ok(1.0);
    };
    let Some(page) = page else {
        eprintln!("Error: --image-size needs the page size in points (--page-size)");
        return Err(1);
    };
    let estimate = estimate_scale(
        image.width,
        image.height,
        page.width,
        page.height,
        &ScaleOptions {
            tolerance: args.scale_tolerance,
        },
    );
    if let Some(warning) = &estimate.warning {
        eprintln!("Warning: {warning}");
    }
    Ok(estimate.scale)
}

/// All `--keep` and `--detector` boxes, converted to points.
pub fn point_regions(args: &RegionArgs, page: Option<Size>) -> Result<Vec<BBox>, i32> {
    let scale = region_scale(args, page)?;
    let regions: Vec<BBox> = args
        .keep
        .iter()
        .chain(&args.detector)
        .map(|b| to_point_space(b, scale))
        .collect();
    tracing::debug!(count = regions.len(), scale, "resolved regions");
    Ok(regions)
}

/// Region arguments converted for successive pages.
///
/// The scale is estimated again only when the page size changes, so a
/// document of equal pages reports a scale mismatch once.
pub struct RegionResolver<'a> {
    args: &'a RegionArgs,
    cached: Option<(Option<Size>, Vec<BBox>)>,
}

impl<'a> RegionResolver<'a> {
    pub fn new(args: &'a RegionArgs) -> Self {
        Self { args, cached: None }
    }

    /// Regions in points for a page of `page` size.
    pub fn regions(&mut self, page: Option<Size>) -> Result<&[BBox], i32> {
        let stale = self.cached.as_ref().is_none_or(|(size, _)| *size != page);
        if stale {
            self.cached = Some((page, point_regions(self.args, page)?));
        }
        Ok(self
            .cached
            .as_ref()
            .map(|(_, regions)| regions.as_slice())
            .unwrap_or_default())
    }
}

/// Read extracted words from a JSON file, or stdin for `-`.
pub fn read_words(path: &Path) -> Result<Vec<Word>, i32> {
    let parsed: Result<Vec<Word>, serde_json::Error> = if path == Path::new("-") {
        serde_json::from_reader(io::stdin().lock())
    } else {
        let file = File::open(path).map_err(|e| {
            eprintln!("Error: cannot read {}: {e}", path.display());
            1
        })?;
        serde_json::from_reader(BufReader::new(file))
    };
    parsed.map_err(|e| {
        eprintln!("Error: invalid words JSON in {}: {e}", path.display());
        1
    })
}

/// `<dir>/<stem><suffix>.pdf` next to `input`.
pub fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}{suffix}.pdf"))
}

/// Save a document, reporting failures.
pub fn save_pdf(doc: &mut PdfDocument, output: &Path) -> Result<(), i32> {
    doc.save(output).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", output.display());
        1
    })
}

/// Print a JSON value, pretty.
pub fn print_json(value: &serde_json::Value) -> Result<(), i32> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{text}");
    Ok(())
}

pub fn bbox_to_json(b: &BBox) -> serde_json::Value {
    serde_json::json!([b.x0, b.top, b.x1, b.bottom])
}

/// Escape a string for CSV output.
///
/// If the text contains commas, double quotes, or newlines, wraps it in
/// double quotes and escapes any internal double quotes by doubling them.
pub fn csv_escape(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
