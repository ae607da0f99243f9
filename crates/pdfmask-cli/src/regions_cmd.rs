use pdfmask_core::{BBox, subtract_many, total_area};

use crate::cli::{OutputFormat, PageSource, RegionArgs};
use crate::shared::{bbox_to_json, point_regions, print_json, resolve_page_size};

pub fn run(page: &PageSource, regions: &RegionArgs, format: &OutputFormat) -> Result<(), i32> {
    let size = resolve_page_size(page)?;
    let kept = point_regions(regions, Some(size))?;
    let page_box = BBox::new(0.0, 0.0, size.width, size.height);
    let covered = subtract_many(&page_box, &kept);

    match format {
        OutputFormat::Text => {
            println!("x0\ttop\tx1\tbottom");
            for b in &covered {
                println!("{:.2}\t{:.2}\t{:.2}\t{:.2}", b.x0, b.top, b.x1, b.bottom);
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "page": [size.width, size.height],
                "kept": kept.iter().map(bbox_to_json).collect::<Vec<_>>(),
                "covered": covered.iter().map(bbox_to_json).collect::<Vec<_>>(),
                "covered_area": total_area(&covered),
            }))?;
        }
        OutputFormat::Csv => {
            println!("x0,top,x1,bottom");
            for b in &covered {
                println!("{},{},{},{}", b.x0, b.top, b.x1, b.bottom);
            }
        }
    }
    Ok(())
}
