//! Parsing boxes and sizes from text.
//!
//! Regions reach the tools as strings: typed on a command line, pasted from
//! an object detector's log, or read from a file. All parsers normalize
//! corners so the resulting [`BBox`] satisfies `x0 <= x1`, `top <= bottom`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoordError;
use crate::geometry::BBox;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][-+]?\d+)?").expect("valid number regex")
});

fn numbers_in(input: &str) -> Result<Vec<f64>, CoordError> {
    NUMBER
        .find_iter(input)
        .map(|m| {
            m.as_str()
                .parse::<f64>()
                .map_err(|_| CoordError::InvalidNumber(m.as_str().to_string()))
        })
        .collect()
}

fn exactly<const N: usize>(input: &str, values: Vec<f64>) -> Result<[f64; N], CoordError> {
    let found = values.len();
    values.try_into().map_err(|_| CoordError::WrongCount {
        expected: N,
        found,
        input: input.to_string(),
    })
}

/// Parse one box from a detector output line.
///
/// Detectors report boxes as `(top, left, bottom, right)`, i.e. y before x,
/// surrounded by arbitrary punctuation such as `[[ 320.8, 653.4, 2315.2, 3519.4 ]]`.
/// Exactly four numbers must be present.
pub fn parse_detector_line(input: &str) -> Result<BBox, CoordError> {
    let [top, left, bottom, right] = exactly::<4>(input, numbers_in(input)?)?;
    Ok(BBox::from_corners(left, top, right, bottom))
}

/// Parse a box written as `x0,y0,x1,y1` (commas and/or whitespace).
pub fn parse_bbox(input: &str) -> Result<BBox, CoordError> {
    let values = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| CoordError::InvalidNumber(s.to_string()))
        })
        .collect::<Result<Vec<f64>, _>>()?;
    let [x0, y0, x1, y1] = exactly::<4>(input, values)?;
    Ok(BBox::from_corners(x0, y0, x1, y1))
}

/// Parse a size written as `WxH` (also accepts `W,H`).
///
/// Both components must be positive and finite.
pub fn parse_size(input: &str) -> Result<(f64, f64), CoordError> {
    let values = input
        .split(|c: char| c == 'x' || c == 'X' || c == ',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| CoordError::InvalidNumber(s.to_string()))
        })
        .collect::<Result<Vec<f64>, _>>()?;
    let [w, h] = exactly::<2>(input, values)?;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(CoordError::NonPositiveSize(input.to_string()));
    }
    Ok((w, h))
}
