//! Per-axis overlap tests. Touching edges count as overlapping.

use crate::rect::Rect;

/// `true` if the horizontal spans `[left, right]` of `a` and `b` intersect.
pub fn overlaps_horizontally(a: &Rect, b: &Rect) -> bool {
    spans_intersect((a.left(), a.right()), (b.left(), b.right()))
}

/// `true` if the vertical spans `[top, bottom]` of `a` and `b` intersect.
pub fn overlaps_vertically(a: &Rect, b: &Rect) -> bool {
    spans_intersect((a.top(), a.bottom()), (b.top(), b.bottom()))
}

fn spans_intersect(a: (f64, f64), b: (f64, f64)) -> bool {
    let (a_lo, a_hi) = a;
    let (b_lo, b_hi) = b;
    (a_lo >= b_lo && a_lo <= b_hi)
        || (a_hi >= b_lo && a_hi <= b_hi)
        || (a_lo <= b_lo && a_hi >= b_hi)
}
