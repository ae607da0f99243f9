use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pdfmask_core::{BBox, DEFAULT_DEDUP_THRESHOLD, parse_bbox, parse_detector_line, parse_size};
use pdfmask_pdf::Rgb;

use crate::page_range::PageSelection;

/// Mask PDF pages outside regions of interest and count labelled words inside them.
#[derive(Debug, Parser)]
#[command(name = "pdfmask", about, version)]
pub struct Cli {
    /// Print debug logs to stderr (RUST_LOG is used otherwise)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Display PDF metadata and page boxes
    Info {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<PageSelection>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,
    },

    /// Compute the pixel-per-point scale between a rendered image and its page
    Scale {
        /// Size of the rendered image in pixels
        #[arg(long, value_name = "WxH", value_parser = size_arg)]
        image_size: Size,

        #[command(flatten)]
        page: PageSource,

        /// Largest accepted difference between the x and y scales
        #[arg(long, default_value_t = 1e-3, value_parser = non_negative_arg)]
        tolerance: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,
    },

    /// List the rectangles covering a page outside the kept regions
    Regions {
        #[command(flatten)]
        page: PageSource,

        #[command(flatten)]
        regions: RegionArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Count distinct labelled words inside regions
    Count {
        /// A PDF, or words as JSON (array of {page, text, x0, top, x1, bottom}); '-' reads JSON from stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        regions: RegionArgs,

        /// Page size in points; overrides the page boxes of a PDF input
        #[arg(long, value_name = "WxH", value_parser = size_arg)]
        page_size: Option<Size>,

        /// Only count this label (case-insensitive)
        #[arg(long)]
        label: Option<String>,

        /// Center distance below which repeated labels are merged
        #[arg(long, default_value_t = DEFAULT_DEDUP_THRESHOLD, value_parser = non_negative_arg)]
        threshold: f64,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<PageSelection>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write an SVG preview of regions and counted words
        #[arg(long, value_name = "OUT.svg")]
        preview: Option<PathBuf>,

        /// Zoom factor of the SVG preview
        #[arg(long, default_value_t = 2.0, value_parser = positive_arg)]
        preview_zoom: f64,
    },

    /// Cover everything outside the kept regions with an opaque fill
    Mask {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        regions: RegionArgs,

        /// 1-based page to mask. Default: every page
        #[arg(long)]
        page: Option<usize>,

        /// Cover the regions themselves instead of everything around them
        #[arg(long)]
        invert: bool,

        /// Also draw the outline of the kept regions
        #[arg(long)]
        outline: bool,

        /// Fill color as 'r,g,b' (0-1 or 0-255)
        #[arg(long, default_value = "1,1,1")]
        color: Rgb,

        /// Output path. Default: <FILE stem>_masked.pdf next to the input
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Export the text of each page
    Text {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<PageSelection>,

        /// Keep the horizontal layout of the page
        #[arg(long)]
        layout: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = TextFormat::Text)]
        format: TextFormat,
    },

    /// List images placed on pages, or write their data to files
    Images {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<PageSelection>,

        /// Output format of the listing
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write each image to image_page<N>_<I>.<ext>
        #[arg(long)]
        extract: bool,

        /// Directory for --extract. Default: current directory
        #[arg(long, value_name = "DIR", requires = "extract")]
        output_dir: Option<PathBuf>,
    },

    /// List the boxes of words, drawings, images, annotations and links
    Elements {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<PageSelection>,

        /// Element kinds to list, comma separated. Default: all
        #[arg(long, value_enum, value_delimiter = ',')]
        kinds: Vec<ElementKind>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write page_<N>.svg outlines of the elements into this directory
        #[arg(long, value_name = "DIR")]
        svg: Option<PathBuf>,
    },

    /// Outline regions on a page
    Mark {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        regions: RegionArgs,

        /// 1-based page to mark. Default: every page
        #[arg(long)]
        page: Option<usize>,

        /// Stroke color as 'r,g,b' (0-1 or 0-255)
        #[arg(long, default_value = "0,1,1")]
        color: Rgb,

        /// Stroke width in points
        #[arg(long, default_value_t = 2.0, value_parser = positive_arg)]
        line_width: f64,

        /// Output path. Default: <FILE stem>_marked.pdf next to the input
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Regions of interest and the space they are expressed in.
#[derive(Debug, Clone, Args)]
pub struct RegionArgs {
    /// Region to keep, as 'x0,y0,x1,y1' (repeatable)
    #[arg(long = "keep", value_name = "BOX", value_parser = bbox_arg)]
    pub keep: Vec<BBox>,

    /// Detector output line with '(top, left, bottom, right)' (repeatable)
    #[arg(long = "detector", value_name = "LINE", value_parser = detector_arg)]
    pub detector: Vec<BBox>,

    /// Boxes are in pixels of an image rendered at this zoom
    #[arg(long, value_parser = positive_arg, conflicts_with = "image_size")]
    pub zoom: Option<f64>,

    /// Boxes are in pixels of an image of this size
    #[arg(long, value_name = "WxH", value_parser = size_arg)]
    pub image_size: Option<Size>,

    /// Largest accepted difference between the x and y scales of --image-size
    #[arg(long = "scale-tolerance", default_value_t = 1e-3, value_parser = non_negative_arg)]
    pub scale_tolerance: f64,
}

impl RegionArgs {
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.detector.is_empty()
    }
}

/// Where a command gets the page size from.
#[derive(Debug, Clone, Args)]
pub struct PageSource {
    /// Page size in points
    #[arg(long, value_name = "WxH", value_parser = size_arg, conflicts_with = "file")]
    pub page_size: Option<Size>,

    /// Read the page size from this PDF
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// 1-based page of --file
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

/// Width and height, in points or pixels depending on the flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

fn size_arg(s: &str) -> Result<Size, String> {
    let (width, height) = parse_size(s).map_err(|e| e.to_string())?;
    Ok(Size { width, height })
}

fn bbox_arg(s: &str) -> Result<BBox, String> {
    parse_bbox(s).map_err(|e| e.to_string())
}

fn detector_arg(s: &str) -> Result<BBox, String> {
    parse_detector_line(s).map_err(|e| e.to_string())
}

fn positive_arg(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("invalid number '{s}'"))?;
    if !(value.is_finite() && value > 0.0) {
        return Err(format!("'{s}' must be a positive number"));
    }
    Ok(value)
}

fn non_negative_arg(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("invalid number '{s}'"))?;
    if !(value.is_finite() && value >= 0.0) {
        return Err(format!("'{s}' must be zero or positive"));
    }
    Ok(value)
}

/// Output format for tabular output.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Kind of page element listed by `elements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ElementKind {
    Words,
    Drawings,
    Images,
    Annots,
    Links,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Words,
        ElementKind::Drawings,
        ElementKind::Images,
        ElementKind::Annots,
        ElementKind::Links,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Words => "word",
            ElementKind::Drawings => "drawing",
            ElementKind::Images => "image",
            ElementKind::Annots => "annot",
            ElementKind::Links => "link",
        }
    }
}

/// Output format for reports.
#[derive(Debug, Clone, ValueEnum)]
pub enum TextFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_info_subcommand() {
        let cli = Cli::parse_from(["pdfmask", "info", "plan.pdf", "--pages", "1,3-5"]);
        match cli.command {
            Commands::Info {
                ref file,
                ref pages,
                ref format,
            } => {
                assert_eq!(file, &PathBuf::from("plan.pdf"));
                assert!(pages.is_some());
                assert!(matches!(format, TextFormat::Text));
            }
            _ => panic!("expected Info subcommand"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_scale_with_page_size() {
        let cli = Cli::parse_from([
            "pdfmask",
            "scale",
            "--image-size",
            "1200x1600",
            "--page-size",
            "600x800",
        ]);
        match cli.command {
            Commands::Scale {
                image_size,
                ref page,
                tolerance,
                ..
            } => {
                assert_eq!(
                    image_size,
                    Size {
                        width: 1200.0,
                        height: 1600.0
                    }
                );
                assert_eq!(
                    page.page_size,
                    Some(Size {
                        width: 600.0,
                        height: 800.0
                    })
                );
                assert!(page.file.is_none());
                assert_eq!(page.page, 1);
                assert!((tolerance - 1e-3).abs() < f64::EPSILON);
            }
            _ => panic!("expected Scale subcommand"),
        }
    }

    #[test]
    fn page_size_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "pdfmask",
            "scale",
            "--image-size",
            "10x10",
            "--page-size",
            "5x5",
            "--file",
            "a.pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_regions_with_repeated_keep() {
        let cli = Cli::parse_from([
            "pdfmask",
            "regions",
            "--page-size",
            "600x800",
            "--keep",
            "100,100,300,300",
            "--keep",
            "400,400,500,500",
            "--format",
            "csv",
        ]);
        match cli.command {
            Commands::Regions {
                ref regions,
                ref format,
                ..
            } => {
                assert_eq!(regions.keep.len(), 2);
                assert_eq!(regions.keep[1], BBox::new(400.0, 400.0, 500.0, 500.0));
                assert!(regions.detector.is_empty());
                assert!(matches!(format, OutputFormat::Csv));
            }
            _ => panic!("expected Regions subcommand"),
        }
    }

    #[test]
    fn parse_detector_line_argument() {
        let cli = Cli::parse_from([
            "pdfmask",
            "mask",
            "plan.pdf",
            "--detector",
            "[[10.0, 20.0, 110.0, 220.0]]",
            "--zoom",
            "2",
        ]);
        match cli.command {
            Commands::Mask {
                ref regions,
                invert,
                outline,
                color,
                ..
            } => {
                assert_eq!(regions.detector, vec![BBox::new(20.0, 10.0, 220.0, 110.0)]);
                assert_eq!(regions.zoom, Some(2.0));
                assert!(!invert);
                assert!(!outline);
                assert_eq!(color, Rgb::WHITE);
            }
            _ => panic!("expected Mask subcommand"),
        }
    }

    #[test]
    fn zoom_conflicts_with_image_size() {
        let result = Cli::try_parse_from([
            "pdfmask",
            "mask",
            "plan.pdf",
            "--zoom",
            "2",
            "--image-size",
            "100x100",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_box_is_rejected() {
        let result = Cli::try_parse_from(["pdfmask", "mask", "plan.pdf", "--keep", "1,2,3"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_zoom_is_rejected() {
        let result = Cli::try_parse_from(["pdfmask", "mask", "plan.pdf", "--zoom", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_count_defaults() {
        let cli = Cli::parse_from(["pdfmask", "count", "words.json"]);
        match cli.command {
            Commands::Count {
                ref input,
                threshold,
                ref label,
                ref preview,
                preview_zoom,
                ..
            } => {
                assert_eq!(input, &PathBuf::from("words.json"));
                assert!((threshold - 5.0).abs() < f64::EPSILON);
                assert!(label.is_none());
                assert!(preview.is_none());
                assert!((preview_zoom - 2.0).abs() < f64::EPSILON);
            }
            _ => panic!("expected Count subcommand"),
        }
    }

    #[test]
    fn parse_elements_kind_list() {
        let cli = Cli::parse_from(["pdfmask", "elements", "plan.pdf", "--kinds", "words,links"]);
        match cli.command {
            Commands::Elements { ref kinds, ref svg, .. } => {
                assert_eq!(kinds, &vec![ElementKind::Words, ElementKind::Links]);
                assert!(svg.is_none());
            }
            _ => panic!("expected Elements subcommand"),
        }
    }

    #[test]
    fn images_output_dir_requires_extract() {
        let result =
            Cli::try_parse_from(["pdfmask", "images", "plan.pdf", "--output-dir", "out"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_mark_with_color_and_verbose() {
        let cli = Cli::parse_from([
            "pdfmask",
            "-v",
            "mark",
            "plan.pdf",
            "--keep",
            "0,0,10,10",
            "--color",
            "255,0,0",
            "--line-width",
            "0.5",
            "--page",
            "2",
            "-o",
            "out.pdf",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Mark {
                color,
                line_width,
                page,
                ref output,
                ..
            } => {
                assert_eq!(color, Rgb::RED);
                assert!((line_width - 0.5).abs() < f64::EPSILON);
                assert_eq!(page, Some(2));
                assert_eq!(output.as_deref(), Some(std::path::Path::new("out.pdf")));
            }
            _ => panic!("expected Mark subcommand"),
        }
    }
}
