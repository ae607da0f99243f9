/// A point in page or pixel space (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Bounding box with top-left origin coordinate system.
///
/// Coordinates follow the usual page convention:
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
///
/// The same type is used for pixel space and point space; which space a
/// value lives in is up to the caller (see [`crate::scale`]).
/// Callers are expected to keep `x0 <= x1` and `top <= bottom`;
/// [`BBox::from_corners`] normalizes two arbitrary corners.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Build a box from two opposite corners given in any order.
    ///
    /// This is how mouse drags and detector outputs become boxes: the
    /// press/release points can arrive in any orientation.
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x0: ax.min(bx),
            top: ay.min(by),
            x1: ax.max(bx),
            bottom: ay.max(by),
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when the box covers no area.
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.top >= self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Whether the two boxes share a region of positive area.
    ///
    /// Boxes that only touch along an edge do not intersect, and an empty
    /// box intersects nothing (not even itself).
    pub fn intersects(&self, other: &BBox) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 < other.x1
            && other.x0 < self.x1
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Overlap of two boxes, or `None` if they do not [intersect](Self::intersects).
    pub fn intersection(&self, other: &BBox) -> Option<BBox> {
        if !self.intersects(other) {
            return None;
        }
        Some(BBox {
            x0: self.x0.max(other.x0),
            top: self.top.max(other.top),
            x1: self.x1.min(other.x1),
            bottom: self.bottom.min(other.bottom),
        })
    }

    /// Half-open point containment: `x0 <= x < x1` and `top <= y < bottom`.
    pub fn contains_point(&self, p: &Point) -> bool {
        self.x0 <= p.x && p.x < self.x1 && self.top <= p.y && p.y < self.bottom
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> BBox {
        BBox {
            x0: self.x0 * factor,
            top: self.top * factor,
            x1: self.x1 * factor,
            bottom: self.bottom * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_new() {
        let bbox = BBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bbox.x0, 10.0);
        assert_eq!(bbox.top, 20.0);
        assert_eq!(bbox.x1, 30.0);
        assert_eq!(bbox.bottom, 40.0);
    }

    #[test]
    fn test_from_corners_normalizes() {
        let bbox = BBox::from_corners(200.0, 50.0, 100.0, 10.0);
        assert_eq!(bbox, BBox::new(100.0, 10.0, 200.0, 50.0));
    }

    #[test]
    fn test_bbox_dimensions() {
        let bbox = BBox::new(10.0, 20.0, 50.0, 60.0);
        assert_eq!(bbox.width(), 40.0);
        assert_eq!(bbox.height(), 40.0);
        assert_eq!(bbox.area(), 1600.0);
    }

    #[test]
    fn test_center() {
        let c = BBox::new(0.0, 0.0, 20.0, 10.0).center();
        assert_eq!(c, Point::new(10.0, 5.0));
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, 5.0, 15.0, 15.0);
        assert!(a.intersects(&b));
        assert_eq!(a.intersection(&b), Some(BBox::new(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_empty_box_intersects_nothing() {
        let empty = BBox::new(5.0, 5.0, 5.0, 8.0);
        assert!(empty.is_empty());
        assert!(!empty.intersects(&empty));
        assert!(!empty.intersects(&BBox::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_contains_point_half_open() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.contains_point(&Point::new(0.0, 0.0)));
        assert!(bbox.contains_point(&Point::new(9.99, 9.99)));
        assert!(!bbox.contains_point(&Point::new(10.0, 5.0)));
        assert!(!bbox.contains_point(&Point::new(5.0, 10.0)));
    }

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(10.0, 20.0, 30.0, 40.0);
        let b = BBox::new(5.0, 25.0, 35.0, 45.0);
        let u = a.union(&b);
        assert_eq!(u, BBox::new(5.0, 20.0, 35.0, 45.0));
    }

    #[test]
    fn test_point_distance() {
        let d = Point::new(10.0, 10.0).distance(&Point::new(13.0, 14.0));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
