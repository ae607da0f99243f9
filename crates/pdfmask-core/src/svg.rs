//! SVG preview of a page's regions and counted labels.
//!
//! Produces a standalone SVG in page coordinates (top-left origin) showing
//! the page boundary, the regions that were kept, the regions that will be
//! masked, and one outlined box per counted occurrence, coloured by label.

use crate::dedupe::DetectionSet;
use crate::geometry::BBox;

/// Ten-colour categorical palette; labels cycle through it in first-seen order.
pub const LABEL_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Options for SVG generation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SvgOptions {
    /// Optional fixed width for the SVG output. If `None`, uses the page width.
    pub width: Option<f64>,
    /// Optional fixed height for the SVG output. If `None`, uses the page height.
    pub height: Option<f64>,
    /// Scale factor for the SVG output. Default is `1.0`.
    pub scale: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            scale: 1.0,
        }
    }
}

/// Stroke and fill for a group of boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub fill_opacity: f64,
    pub stroke_width: f64,
}

impl DrawStyle {
    /// Cyan outline used for kept regions.
    pub fn kept_default() -> Self {
        Self {
            stroke: Some("#00ffff".to_string()),
            fill: None,
            fill_opacity: 0.0,
            stroke_width: 2.0,
        }
    }

    /// Translucent grey used for regions that will be masked.
    pub fn covered_default() -> Self {
        Self {
            stroke: None,
            fill: Some("#808080".to_string()),
            fill_opacity: 0.35,
            stroke_width: 0.0,
        }
    }

    /// Plain outline in `color`, used for detections.
    pub fn outline(color: &str) -> Self {
        Self {
            stroke: Some(color.to_string()),
            fill: None,
            fill_opacity: 0.0,
            stroke_width: 1.0,
        }
    }

    fn attrs(&self) -> String {
        let fill = self.fill.as_deref().unwrap_or("none");
        let mut attrs = format!("fill=\"{fill}\"");
        if self.fill.is_some() {
            attrs.push_str(&format!(" fill-opacity=\"{}\"", self.fill_opacity));
        }
        match &self.stroke {
            Some(stroke) => attrs.push_str(&format!(
                " stroke=\"{stroke}\" stroke-width=\"{}\"",
                self.stroke_width
            )),
            None => attrs.push_str(" stroke=\"none\""),
        }
        attrs
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders page overlays as SVG markup.
pub struct SvgRenderer {
    page_width: f64,
    page_height: f64,
    page_bbox: BBox,
    elements: Vec<String>,
}

impl SvgRenderer {
    /// Create a new `SvgRenderer` for a page with the given dimensions.
    pub fn new(page_width: f64, page_height: f64) -> Self {
        let page_bbox = BBox::new(0.0, 0.0, page_width, page_height);
        Self {
            page_width,
            page_height,
            page_bbox,
            elements: Vec::new(),
        }
    }

    fn rect_element(bbox: &BBox, style: &DrawStyle) -> String {
        format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
            bbox.x0,
            bbox.top,
            bbox.width(),
            bbox.height(),
            style.attrs(),
        )
    }

    /// Draw every box in `regions` with `style`.
    pub fn draw_regions(&mut self, regions: &[BBox], style: &DrawStyle) {
        for region in regions {
            self.elements.push(Self::rect_element(region, style));
        }
    }

    /// Draw each kept occurrence with its label above the box.
    ///
    /// Colours follow [`LABEL_PALETTE`] by label order.
    pub fn draw_detections(&mut self, detections: &DetectionSet) {
        for (i, (label, boxes)) in detections.iter().enumerate() {
            let color = LABEL_PALETTE[i % LABEL_PALETTE.len()];
            let style = DrawStyle::outline(color);
            let text = escape_xml(label);
            for bbox in boxes {
                self.elements.push(Self::rect_element(bbox, &style));
                self.elements.push(format!(
                    "  <text x=\"{}\" y=\"{}\" fill=\"{color}\" font-size=\"8\">{text}</text>",
                    bbox.x0, bbox.top,
                ));
            }
        }
    }

    /// Generate the complete SVG document.
    ///
    /// `viewBox` is always the page size; `options` only change the
    /// rendered width and height.
    pub fn to_svg(&self, options: &SvgOptions) -> String {
        let view_width = self.page_width;
        let view_height = self.page_height;

        let svg_width = options.width.unwrap_or(self.page_width * options.scale);
        let svg_height = options.height.unwrap_or(self.page_height * options.scale);

        let mut svg = String::new();

        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" \
             width=\"{svg_width}\" height=\"{svg_height}\" \
             viewBox=\"0 0 {view_width} {view_height}\">\n"
        ));

        // Page boundary rectangle
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
             fill=\"white\" stroke=\"black\" stroke-width=\"0.5\"/>\n",
            self.page_bbox.x0,
            self.page_bbox.top,
            self.page_bbox.width(),
            self.page_bbox.height(),
        ));

        for element in &self.elements {
            svg.push_str(element);
            svg.push('\n');
        }

        svg.push_str("</svg>\n");

        svg
    }
}
