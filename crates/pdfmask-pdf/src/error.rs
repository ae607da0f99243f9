//! Error types for the PDF backend.
//!
//! Uses [`thiserror`] for ergonomic error derivation. [`PdfBackendError`]
//! wraps `lopdf` and I/O failures together with the few structural problems
//! this crate reports itself.

use thiserror::Error;

/// Error type for opening, inspecting, editing and saving PDFs.
#[derive(Debug, Error)]
pub enum PdfBackendError {
    /// The PDF structure is not what was expected (missing or malformed entries).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is encrypted; masking encrypted files is not supported.
    #[error("document is encrypted")]
    Encrypted,

    /// A 0-based page index past the end of the document.
    #[error("page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    /// An error reported by lopdf.
    #[error(transparent)]
    Lopdf(#[from] lopdf::Error),
}
