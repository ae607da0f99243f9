//! Content-stream operators for masks and outlines.

use std::fmt;
use std::str::FromStr;

use lopdf::Object;
use lopdf::content::{Content, Operation};

use crate::error::PdfBackendError;
use crate::page_geometry::NativeRect;

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const CYAN: Rgb = Rgb::new(0.0, 1.0, 1.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    fn operands(&self) -> Vec<Object> {
        vec![real(self.r), real(self.g), real(self.b)]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Parses `r,g,b`.
///
/// Components are fractions in `0..=1`. When any component is above 1 all
/// three are read as 8-bit values (`0,255,255`).
impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!(
                "invalid color '{s}': expected three components 'r,g,b'"
            ));
        }
        let mut values = [0.0f64; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| format!("invalid color component '{part}'"))?;
        }
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(format!("invalid color '{s}': components must be >= 0"));
        }
        if values.iter().any(|v| *v > 1.0) {
            if values.iter().any(|v| *v > 255.0) {
                return Err(format!("invalid color '{s}': components must be <= 255"));
            }
            for v in &mut values {
                *v /= 255.0;
            }
        }
        Ok(Rgb::new(values[0], values[1], values[2]))
    }
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn rect_operation(rect: &NativeRect) -> Operation {
    Operation::new(
        "re",
        vec![
            real(rect.x),
            real(rect.y),
            real(rect.width),
            real(rect.height),
        ],
    )
}

/// `q <color> rg <rects> re f Q`: solid fill of every rectangle.
pub(crate) fn fill_operations(rects: &[NativeRect], color: Rgb) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(rects.len() + 4);
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("rg", color.operands()));
    ops.extend(rects.iter().map(rect_operation));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));
    ops
}

/// `q <color> RG <width> w <rects> re S Q`: stroked outline of every rectangle.
pub(crate) fn stroke_operations(
    rects: &[NativeRect],
    color: Rgb,
    line_width: f64,
) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(rects.len() + 5);
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("RG", color.operands()));
    ops.push(Operation::new("w", vec![real(line_width)]));
    ops.extend(rects.iter().map(rect_operation));
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));
    ops
}

pub(crate) fn encode(operations: Vec<Operation>) -> Result<Vec<u8>, PdfBackendError> {
    Ok(Content { operations }.encode()?)
}
