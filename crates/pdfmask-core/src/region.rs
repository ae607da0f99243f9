//! Rectangle set difference.
//!
//! Masking "everything except the selected regions" needs the complement of
//! a set of boxes inside the page box. [`subtract`] splits one box around
//! one hole; [`subtract_many`] folds that over a list of holes.

use crate::geometry::BBox;

/// Remove the area of `sub` from `base`.
///
/// Returns `[base]` when the two do not intersect. Otherwise returns up to
/// four pairwise non-overlapping strips, in this order, each only when it
/// has positive extent:
///
/// 1. top: full width of `base`, above the overlap
/// 2. bottom: full width of `base`, below the overlap
/// 3. left: beside the overlap, between its top and bottom
/// 4. right: beside the overlap, between its top and bottom
///
/// The strips partition `base \ sub`, but not with the fewest rectangles.
pub fn subtract(base: &BBox, sub: &BBox) -> Vec<BBox> {
    let Some(inter) = base.intersection(sub) else {
        return vec![*base];
    };

    let mut pieces = Vec::with_capacity(4);
    if inter.top > base.top {
        pieces.push(BBox::new(base.x0, base.top, base.x1, inter.top));
    }
    if inter.bottom < base.bottom {
        pieces.push(BBox::new(base.x0, inter.bottom, base.x1, base.bottom));
    }
    if inter.x0 > base.x0 {
        pieces.push(BBox::new(base.x0, inter.top, inter.x0, inter.bottom));
    }
    if inter.x1 < base.x1 {
        pieces.push(BBox::new(inter.x1, inter.top, base.x1, inter.bottom));
    }
    pieces
}

/// Subtract every box in `subs` from `full`.
///
/// Starts from `[full]` and, for each `sub` in order, replaces every
/// accumulated box by its [`subtract`] pieces. The covered area does not
/// depend on the order of `subs`; the number and shape of the pieces may.
/// Adjacent inputs can leave near-degenerate slivers, which carry no
/// visible fill.
pub fn subtract_many(full: &BBox, subs: &[BBox]) -> Vec<BBox> {
    let mut covers = vec![*full];
    for sub in subs {
        covers = covers.iter().flat_map(|r| subtract(r, sub)).collect();
    }
    covers
}

/// Sum of the areas of `boxes` (overlaps are counted twice).
pub fn total_area(boxes: &[BBox]) -> f64 {
    boxes.iter().map(BBox::area).sum()
}
