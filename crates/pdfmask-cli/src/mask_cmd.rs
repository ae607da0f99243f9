use std::path::Path;

use pdfmask_pdf::Rgb;

use crate::cli::RegionArgs;
use crate::shared::{RegionResolver, default_output, open_pdf, page_size, resolve_page, save_pdf};

/// Outline drawn around kept regions with `--outline`.
const OUTLINE_COLOR: Rgb = Rgb::CYAN;
const OUTLINE_WIDTH: f64 = 2.0;

/// Everything the `mask` subcommand was asked to do.
pub struct MaskRequest<'a> {
    pub file: &'a Path,
    pub regions: &'a RegionArgs,
    pub page: Option<usize>,
    pub invert: bool,
    pub outline: bool,
    pub color: Rgb,
    pub output: Option<&'a Path>,
}

pub fn run(request: &MaskRequest<'_>) -> Result<(), i32> {
    let mut doc = open_pdf(request.file)?;
    let indices = resolve_page(request.page, doc.page_count())?;
    if request.regions.is_empty() && !request.invert {
        eprintln!("Warning: no regions given; the whole page will be covered");
    }

    let mut resolver = RegionResolver::new(request.regions);
    let mut painted = 0;
    for &idx in &indices {
        let size = page_size(&doc, idx)?;
        let regions = resolver.regions(Some(size))?;
        let report = |e: pdfmask_pdf::PdfBackendError| {
            eprintln!("Error painting page {}: {e}", idx + 1);
            1
        };

        painted += if request.invert {
            doc.fill_regions(idx, regions, request.color)
                .map_err(report)?
        } else {
            doc.mask_outside(idx, regions, request.color)
                .map_err(report)?
                .iter()
                .filter(|b| !b.is_empty())
                .count()
        };
        if request.outline {
            doc.outline_regions(idx, regions, OUTLINE_COLOR, OUTLINE_WIDTH)
                .map_err(report)?;
        }
    }

    let output = request
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(request.file, "_masked"));
    save_pdf(&mut doc, &output)?;
    println!(
        "Masked {} page(s) with {painted} rectangle(s): {}",
        indices.len(),
        output.display()
    );
    Ok(())
}
