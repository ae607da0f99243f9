//! Error and warning types for pdfmask.
//!
//! Provides [`CoordError`] for coordinate input that cannot be turned into a
//! box or size, and [`ScaleWarning`] for the non-fatal case where a rendered
//! image does not scale uniformly against its page.

use std::fmt;

use thiserror::Error;

/// Failure to parse coordinate input (boxes, sizes, detector lines).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// The input did not contain the expected number of values.
    #[error("expected {expected} numbers, found {found} in '{input}'")]
    WrongCount {
        expected: usize,
        found: usize,
        input: String,
    },

    /// A component could not be parsed as a number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// A size component was zero, negative or not finite.
    #[error("size must be positive and finite, got '{0}'")]
    NonPositiveSize(String),
}

/// Non-fatal warning: the horizontal and vertical scale factors differ.
///
/// This usually means the image was stretched or cropped relative to the
/// page. Processing continues with the mean of both factors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleWarning {
    pub zoom_x: f64,
    pub zoom_y: f64,
    /// Tolerance that was exceeded.
    pub tolerance: f64,
}

impl fmt::Display for ScaleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x/y scale mismatch ({:.4} vs {:.4}, tolerance {}); using the average",
            self.zoom_x, self.zoom_y, self.tolerance
        )
    }
}
