//! Mapping between PDF native space and page display space.
//!
//! Region boxes are given in display space: top-left origin, as the page
//! appears after `/Rotate` and the CropBox are applied. Drawing operators
//! work in native space: bottom-left origin of the unrotated MediaBox.
//! [`PageGeometry`] converts in both directions.

use pdfmask_core::BBox;

/// An axis-aligned rectangle in native PDF space, ready for the `re` operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Page box and rotation of a single page.
///
/// # Coordinate Transform Pipeline
///
/// Native to display:
///
/// 1. Offset from MediaBox origin
/// 2. Apply rotation (0°/90°/180°/270° clockwise)
/// 3. Offset by CropBox position (in rotated space)
/// 4. Y-flip (bottom-left → top-left origin)
///
/// Display to native runs the same steps backwards.
///
/// # Example
///
/// ```
/// use pdfmask_core::BBox;
/// use pdfmask_pdf::PageGeometry;
///
/// // US Letter page, no crop, no rotation
/// let geo = PageGeometry::new(BBox::new(0.0, 0.0, 612.0, 792.0), None, 0);
///
/// // 72pt from the top of the visible page is y=720 in PDF space.
/// let (x, y) = geo.to_native_point(72.0, 72.0);
/// assert!((x - 72.0).abs() < 0.01);
/// assert!((y - 720.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    rotation: i32,
    media_x0: f64,
    media_y0: f64,
    native_width: f64,
    native_height: f64,
    crop_rx0: f64,
    crop_ry0: f64,
    display_width: f64,
    display_height: f64,
}

impl PageGeometry {
    /// Build the geometry of a page.
    ///
    /// `media_box` and `crop_box` hold raw PDF array values:
    /// `x0` = left, `top` = y-min, `x1` = right, `bottom` = y-max.
    /// Without a CropBox the MediaBox is the visible area. `rotation` is
    /// the `/Rotate` value and is normalized to 0, 90, 180 or 270.
    pub fn new(media_box: BBox, crop_box: Option<BBox>, rotation: i32) -> Self {
        let rotation = rotation.rem_euclid(360);

        let media_x0 = media_box.x0;
        let media_y0 = media_box.top;
        let native_width = media_box.width();
        let native_height = media_box.height();

        let crop = crop_box.unwrap_or(media_box);
        let cx0 = crop.x0 - media_x0;
        let cy0 = crop.top - media_y0;
        let cx1 = crop.x1 - media_x0;
        let cy1 = crop.bottom - media_y0;

        let (crop_rx0, crop_ry0, crop_rx1, crop_ry1) = match rotation {
            90 => (cy0, native_width - cx1, cy1, native_width - cx0),
            180 => (
                native_width - cx1,
                native_height - cy1,
                native_width - cx0,
                native_height - cy0,
            ),
            270 => (native_height - cy1, cx0, native_height - cy0, cx1),
            _ => (cx0, cy0, cx1, cy1),
        };

        Self {
            rotation,
            media_x0,
            media_y0,
            native_width,
            native_height,
            crop_rx0,
            crop_ry0,
            display_width: crop_rx1 - crop_rx0,
            display_height: crop_ry1 - crop_ry0,
        }
    }

    /// Visible page width after rotation and cropping.
    pub fn width(&self) -> f64 {
        self.display_width
    }

    /// Visible page height after rotation and cropping.
    pub fn height(&self) -> f64 {
        self.display_height
    }

    /// Normalized page rotation in degrees.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// The whole visible page as a display-space box.
    pub fn page_bbox(&self) -> BBox {
        BBox::new(0.0, 0.0, self.display_width, self.display_height)
    }

    /// Native point to display point.
    pub fn to_display_point(&self, x: f64, y: f64) -> (f64, f64) {
        let px = x - self.media_x0;
        let py = y - self.media_y0;

        let (rx, ry) = match self.rotation {
            90 => (py, self.native_width - px),
            180 => (self.native_width - px, self.native_height - py),
            270 => (self.native_height - py, px),
            _ => (px, py),
        };

        let cx = rx - self.crop_rx0;
        let cy = ry - self.crop_ry0;
        (cx, self.display_height - cy)
    }

    /// Display point to native point.
    pub fn to_native_point(&self, x: f64, y: f64) -> (f64, f64) {
        let rx = x + self.crop_rx0;
        let ry = (self.display_height - y) + self.crop_ry0;

        let (px, py) = match self.rotation {
            90 => (self.native_width - ry, rx),
            180 => (self.native_width - rx, self.native_height - ry),
            270 => (ry, self.native_height - rx),
            _ => (rx, ry),
        };

        (px + self.media_x0, py + self.media_y0)
    }

    /// Native rectangle (given by two corners) to a display box.
    pub fn to_display_bbox(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BBox {
        let (x0, y0) = self.to_display_point(min_x, min_y);
        let (x1, y1) = self.to_display_point(max_x, max_y);
        BBox::from_corners(x0, y0, x1, y1)
    }

    /// Display box to the native rectangle covering the same area.
    ///
    /// Rotation may swap which corner is the minimum, so the result is
    /// re-normalized to a positive width and height.
    pub fn to_native_rect(&self, bbox: &BBox) -> NativeRect {
        let (ax, ay) = self.to_native_point(bbox.x0, bbox.top);
        let (bx, by) = self.to_native_point(bbox.x1, bbox.bottom);
        NativeRect {
            x: ax.min(bx),
            y: ay.min(by),
            width: (ax - bx).abs(),
            height: (ay - by).abs(),
        }
    }
}
