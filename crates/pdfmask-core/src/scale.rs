//! Conversion between pixel space and page point space.
//!
//! A page rendered at zoom `z` produces an image whose pixel coordinates are
//! the point coordinates multiplied by `z`. When only the image is known,
//! the zoom is recovered by dividing its pixel size by the page size in
//! points, independently per axis.

use crate::error::ScaleWarning;
use crate::geometry::BBox;

/// Options for scale estimation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleOptions {
    /// Maximum allowed difference between the x and y factors before a
    /// [`ScaleWarning`] is reported. Default: `1e-3`.
    pub tolerance: f64,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self { tolerance: 1e-3 }
    }
}

/// Result of [`estimate_scale`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleEstimate {
    /// Working scale (pixels per point).
    pub scale: f64,
    /// Horizontal factor: pixel width / point width.
    pub zoom_x: f64,
    /// Vertical factor: pixel height / point height.
    pub zoom_y: f64,
    /// Present when the two factors differ by more than the tolerance.
    pub warning: Option<ScaleWarning>,
}

/// Estimate the pixel/point scale from an image size and a page size.
///
/// Page dimensions must be positive. The working scale is the mean of the
/// two axis factors; if they diverge by more than `options.tolerance` a
/// warning is attached and processing can continue.
pub fn estimate_scale(
    pixel_width: f64,
    pixel_height: f64,
    point_width: f64,
    point_height: f64,
    options: &ScaleOptions,
) -> ScaleEstimate {
    let zoom_x = pixel_width / point_width;
    let zoom_y = pixel_height / point_height;

    let warning = if (zoom_x - zoom_y).abs() > options.tolerance {
        #[cfg(feature = "tracing")]
        tracing::warn!(zoom_x, zoom_y, "x/y scale mismatch, using the average");
        Some(ScaleWarning {
            zoom_x,
            zoom_y,
            tolerance: options.tolerance,
        })
    } else {
        None
    };

    ScaleEstimate {
        scale: (zoom_x + zoom_y) / 2.0,
        zoom_x,
        zoom_y,
        warning,
    }
}

/// Convert a pixel-space box to point space.
pub fn to_point_space(bbox: &BBox, scale: f64) -> BBox {
    BBox::new(
        bbox.x0 / scale,
        bbox.top / scale,
        bbox.x1 / scale,
        bbox.bottom / scale,
    )
}

/// Convert a point-space box to pixel space.
pub fn to_pixel_space(bbox: &BBox, scale: f64) -> BBox {
    bbox.scaled(scale)
}
