//! PDF backend for pdfmask, built on [lopdf](https://docs.rs/lopdf).
//!
//! [`PdfDocument`] reads page boxes and metadata and paints rectangles
//! onto pages. Regions are passed in display space (top-left origin of the
//! visible page, in points); [`PageGeometry`] maps them onto the page's
//! native coordinate system, honouring `/Rotate`, MediaBox and CropBox.

pub mod document;
pub mod error;
pub mod page_geometry;
pub mod paint;

pub use document::{DocumentMetadata, PageInfo, PdfDocument};
pub use error::PdfBackendError;
pub use page_geometry::{NativeRect, PageGeometry};
pub use paint::Rgb;
