use pdfmask_core::{ScaleOptions, estimate_scale};

use crate::cli::{PageSource, Size, TextFormat};
use crate::shared::{print_json, resolve_page_size};

pub fn run(
    image_size: Size,
    page: &PageSource,
    tolerance: f64,
    format: &TextFormat,
) -> Result<(), i32> {
    let page_size = resolve_page_size(page)?;
    let estimate = estimate_scale(
        image_size.width,
        image_size.height,
        page_size.width,
        page_size.height,
        &ScaleOptions { tolerance },
    );
    if let Some(warning) = &estimate.warning {
        eprintln!("Warning: {warning}");
    }

    match format {
        TextFormat::Text => {
            println!("Page: {:.2} x {:.2} pt", page_size.width, page_size.height);
            println!("Image: {} x {} px", image_size.width, image_size.height);
            println!("Zoom x: {:.4}", estimate.zoom_x);
            println!("Zoom y: {:.4}", estimate.zoom_y);
            println!("Scale: {:.4}", estimate.scale);
        }
        TextFormat::Json => {
            print_json(&serde_json::json!({
                "page_width": page_size.width,
                "page_height": page_size.height,
                "image_width": image_size.width,
                "image_height": image_size.height,
                "zoom_x": estimate.zoom_x,
                "zoom_y": estimate.zoom_y,
                "scale": estimate.scale,
                "warning": estimate.warning.as_ref().map(|w| w.to_string()),
            }))?;
        }
    }
    Ok(())
}
