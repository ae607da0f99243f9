//! pdfmask-core: backend-independent region geometry.
//!
//! This crate provides the value types ([`BBox`], [`Point`], [`Detection`],
//! [`Word`]) and the algorithms the pdfmask tools are built on: pixel/point
//! scale conversion, rectangle set difference for masking, proximity
//! deduplication for counting, and SVG previews. Nothing here performs I/O.

pub mod coords;
pub mod dedupe;
pub mod error;
pub mod geometry;
pub mod region;
pub mod scale;
pub mod svg;
pub mod words;

pub use coords::{parse_bbox, parse_detector_line, parse_size};
pub use dedupe::{DEFAULT_DEDUP_THRESHOLD, Detection, DetectionSet, LabelCount, is_duplicate};
pub use error::{CoordError, ScaleWarning};
pub use geometry::{BBox, Point};
pub use region::{subtract, subtract_many, total_area};
pub use scale::{ScaleEstimate, ScaleOptions, estimate_scale, to_pixel_space, to_point_space};
pub use svg::{DrawStyle, LABEL_PALETTE, SvgOptions, SvgRenderer};
pub use words::{
    CountOptions, PageDetections, Word, count_words, count_words_by_page, word_in_regions,
};
