use std::path::Path;

use pdfmask_pdf::Rgb;

use crate::cli::RegionArgs;
use crate::shared::{RegionResolver, default_output, open_pdf, page_size, resolve_page, save_pdf};

pub fn run(
    file: &Path,
    regions: &RegionArgs,
    page: Option<usize>,
    color: Rgb,
    line_width: f64,
    output: Option<&Path>,
) -> Result<(), i32> {
    if regions.is_empty() {
        eprintln!("Error: at least one --keep or --detector region is required");
        return Err(1);
    }

    let mut doc = open_pdf(file)?;
    let indices = resolve_page(page, doc.page_count())?;

    let mut resolver = RegionResolver::new(regions);
    let mut drawn = 0;
    for &idx in &indices {
        let size = page_size(&doc, idx)?;
        let boxes = resolver.regions(Some(size))?;
        drawn += doc
            .outline_regions(idx, boxes, color, line_width)
            .map_err(|e| {
                eprintln!("Error painting page {}: {e}", idx + 1);
                1
            })?;
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(file, "_marked"));
    save_pdf(&mut doc, &output)?;
    println!(
        "Marked {drawn} region(s) on {} page(s): {}",
        indices.len(),
        output.display()
    );
    Ok(())
}
