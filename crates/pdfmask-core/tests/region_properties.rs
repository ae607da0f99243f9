//! Property checks for region subtraction and deduplication over a grid of
//! box placements.

use pdfmask_core::*;

const EPS: f64 = 1e-9;

/// Boxes with corners on a coarse grid around a 100x100 base, including
/// boxes that stick out, touch an edge, or miss the base entirely.
fn grid_boxes() -> Vec<BBox> {
    let stops = [-20.0, 0.0, 30.0, 70.0, 100.0, 130.0];
    let mut boxes = Vec::new();
    for (i, &x0) in stops.iter().enumerate() {
        for &x1 in &stops[i + 1..] {
            for (j, &top) in stops.iter().enumerate() {
                for &bottom in &stops[j + 1..] {
                    boxes.push(BBox::new(x0, top, x1, bottom));
                }
            }
        }
    }
    boxes
}

#[test]
fn subtraction_conserves_area() {
    let base = BBox::new(0.0, 0.0, 100.0, 100.0);
    for sub in grid_boxes() {
        let pieces = subtract(&base, &sub);
        let inter = base.intersection(&sub).map_or(0.0, |b| b.area());
        assert!(
            (total_area(&pieces) + inter - base.area()).abs() < EPS,
            "area not conserved for {sub:?}"
        );
        assert!(pieces.len() <= 4);
    }
}

#[test]
fn pieces_avoid_the_hole_and_each_other() {
    let base = BBox::new(0.0, 0.0, 100.0, 100.0);
    for sub in grid_boxes() {
        let pieces = subtract(&base, &sub);
        for (i, p) in pieces.iter().enumerate() {
            assert!(!p.intersects(&sub) || !base.intersects(&sub), "{p:?} overlaps {sub:?}");
            assert!(p.area() > 0.0, "degenerate piece {p:?}");
            for q in &pieces[i + 1..] {
                assert!(!p.intersects(q));
            }
        }
    }
}

#[test]
fn self_subtraction_is_empty() {
    for r in grid_boxes() {
        assert!(subtract(&r, &r).iter().all(|p| p.area() <= 0.0));
    }
}

#[test]
fn disjoint_subtraction_is_identity() {
    let base = BBox::new(0.0, 0.0, 100.0, 100.0);
    for sub in grid_boxes().into_iter().filter(|s| !s.intersects(&base)) {
        assert_eq!(subtract(&base, &sub), vec![base]);
    }
}

#[test]
fn subtract_many_area_is_order_independent() {
    let full = BBox::new(0.0, 0.0, 100.0, 100.0);
    let boxes = grid_boxes();
    for pair in boxes.chunks(7).take(60) {
        let forward = subtract_many(&full, pair);
        let reversed: Vec<BBox> = pair.iter().rev().copied().collect();
        let backward = subtract_many(&full, &reversed);
        assert!((total_area(&forward) - total_area(&backward)).abs() < EPS);
        for piece in &forward {
            for kept in pair {
                assert!(!piece.intersects(kept));
            }
        }
    }
}

#[test]
fn page_masking_scenario() {
    // Page 600x800, user dragged (200,200)-(600,600) on a zoom-2 preview.
    let est = estimate_scale(1200.0, 1600.0, 600.0, 800.0, &ScaleOptions::default());
    let kept = to_point_space(&BBox::new(200.0, 200.0, 600.0, 600.0), est.scale);
    assert_eq!(kept, BBox::new(100.0, 100.0, 300.0, 300.0));

    let page = BBox::new(0.0, 0.0, 600.0, 800.0);
    let covers = subtract_many(&page, &[kept]);
    assert!((total_area(&covers) - 440_000.0).abs() < EPS);
}

#[test]
fn duplicate_properties() {
    for b in grid_boxes() {
        assert!(!is_duplicate(&b, &[], 5.0));
        assert!(is_duplicate(&b, &[b], 1e-6));
    }
    let a = BBox::new(0.0, 0.0, 2.0, 2.0);
    let exactly = BBox::new(5.0, 0.0, 7.0, 2.0);
    let under = BBox::new(4.9, 0.0, 6.9, 2.0);
    assert!(!is_duplicate(&exactly, &[a], 5.0));
    assert!(is_duplicate(&under, &[a], 5.0));
}

#[test]
fn counting_scenario_two_unique() {
    let words = vec![
        Word::new(1, "P1", BBox::new(9.0, 9.0, 11.0, 11.0)),
        Word::new(1, "P1", BBox::new(11.0, 10.0, 13.0, 12.0)),
        Word::new(1, "P1", BBox::new(49.0, 49.0, 51.0, 51.0)),
    ];
    let set = count_words(&words, &[], &CountOptions::default());
    assert_eq!(set.total(), 2);
}
