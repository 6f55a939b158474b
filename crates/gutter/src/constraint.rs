//! Pairwise margin enforcement on constraint boxes.
//!
//! A constraint box is the largest region a placement may occupy. It starts as the page inset by
//! the margin and is only ever shrunk: for every pair of placements that is separated along one
//! axis while overlapping along the other, the gap between them is split at its midpoint and each
//! side gives up half of the margin.
//!
//! Pairs separated along both axes (diagonal neighbours) produce no constraint at all.

use crate::interference::{overlaps_horizontally, overlaps_vertically};
use crate::layout::PlacementId;
use crate::rect::Rect;
use indexmap::IndexMap;

/// Which axes produced a constraint for a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Separation {
    /// The pair sits side by side (separated along x, overlapping along y).
    pub horizontal: bool,
    /// The pair is stacked (separated along y, overlapping along x).
    pub vertical: bool,
}

impl Separation {
    pub fn is_constrained(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Tightens `box1`/`box2` so that the placements `i1`/`i2` keep `margin` between them.
///
/// Edges only ever move inward. Calling this again with the same inputs is a no-op, and swapping
/// the two placements (together with their boxes) yields the same boxes.
pub fn tighten_pair(
    i1: &Rect,
    i2: &Rect,
    box1: &mut Rect,
    box2: &mut Rect,
    margin: f64,
) -> Separation {
    let half = margin / 2.0;
    let mut separation = Separation::default();

    if i1.right() <= i2.left() {
        if overlaps_vertically(i1, i2) {
            let mid = i1.right() + (i2.left() - i1.right()) / 2.0;
            *box1 = box1.with_right(box1.right().min(mid - half));
            *box2 = box2.with_left(box2.left().max(mid + half));
            separation.horizontal = true;
        }
    } else if i1.left() >= i2.right() && overlaps_vertically(i1, i2) {
        let mid = i2.right() + (i1.left() - i2.right()) / 2.0;
        *box1 = box1.with_left(box1.left().max(mid + half));
        *box2 = box2.with_right(box2.right().min(mid - half));
        separation.horizontal = true;
    }

    if i1.bottom() <= i2.top() {
        if overlaps_horizontally(i1, i2) {
            let mid = i1.bottom() + (i2.top() - i1.bottom()) / 2.0;
            *box1 = box1.with_bottom(box1.bottom().min(mid - half));
            *box2 = box2.with_top(box2.top().max(mid + half));
            separation.vertical = true;
        }
    } else if i1.top() >= i2.bottom() && overlaps_horizontally(i1, i2) {
        let mid = i2.bottom() + (i1.top() - i2.bottom()) / 2.0;
        *box1 = box1.with_top(box1.top().max(mid + half));
        *box2 = box2.with_bottom(box2.bottom().min(mid - half));
        separation.vertical = true;
    }

    separation
}

/// Constraint boxes for one page, keyed by placement token.
#[derive(Debug, Clone)]
pub struct ConstraintBoxes {
    initial: Rect,
    boxes: IndexMap<PlacementId, Rect>,
}

impl ConstraintBoxes {
    /// Every box starts out as `initial`, usually the page inset by the margin.
    pub fn new(initial: Rect, ids: impl IntoIterator<Item = PlacementId>) -> Self {
        let boxes = ids.into_iter().map(|id| (id, initial)).collect();
        Self { initial, boxes }
    }

    pub fn get(&self, id: PlacementId) -> Option<&Rect> {
        self.boxes.get(&id)
    }

    /// Applies [`tighten_pair`] to the boxes of `a` and `b`.
    ///
    /// A placement without a box yet gets one seeded from the initial rectangle.
    pub fn tighten(
        &mut self,
        a: (PlacementId, &Rect),
        b: (PlacementId, &Rect),
        margin: f64,
    ) -> Separation {
        let (id_a, rect_a) = a;
        let (id_b, rect_b) = b;
        let mut box_a = *self.boxes.entry(id_a).or_insert(self.initial);
        let mut box_b = *self.boxes.entry(id_b).or_insert(self.initial);

        let separation = tighten_pair(rect_a, rect_b, &mut box_a, &mut box_b, margin);

        self.boxes.insert(id_a, box_a);
        self.boxes.insert(id_b, box_b);
        separation
    }

    pub fn into_inner(self) -> IndexMap<PlacementId, Rect> {
        self.boxes
    }
}

#[cfg(test)]
mod tests {
    use super::{ConstraintBoxes, Separation, tighten_pair};
    use crate::layout::PlacementId;
    use crate::rect::Rect;

    fn page_box() -> Rect {
        Rect::from_edges(20.0, 20.0, 280.0, 380.0)
    }

    #[test]
    fn side_by_side_pair_splits_the_gap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 150.0, 100.0, 100.0);
        let (mut box_a, mut box_b) = (page_box(), page_box());

        let sep = tighten_pair(&a, &b, &mut box_a, &mut box_b, 20.0);

        assert_eq!(
            sep,
            Separation {
                horizontal: true,
                vertical: false
            }
        );
        assert_eq!(box_a.right(), 115.0);
        assert_eq!(box_b.left(), 135.0);
        assert_eq!(box_a.left(), 20.0);
        assert_eq!(box_b.right(), 380.0);
    }

    #[test]
    fn stacked_pair_in_reverse_order() {
        let upper = Rect::new(0.0, 0.0, 100.0, 100.0);
        let lower = Rect::new(140.0, 50.0, 100.0, 100.0);
        let (mut box_lower, mut box_upper) = (page_box(), page_box());

        let sep = tighten_pair(&lower, &upper, &mut box_lower, &mut box_upper, 10.0);

        assert!(sep.vertical && !sep.horizontal);
        assert_eq!(box_upper.bottom(), 115.0);
        assert_eq!(box_lower.top(), 125.0);
    }

    #[test]
    fn overlapping_pair_is_left_alone() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let (mut box_a, mut box_b) = (page_box(), page_box());

        let sep = tighten_pair(&a, &b, &mut box_a, &mut box_b, 20.0);

        assert!(!sep.is_constrained());
        assert_eq!(box_a, page_box());
        assert_eq!(box_b, page_box());
    }

    #[test]
    fn never_loosens_an_already_tighter_box() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 150.0, 100.0, 100.0);
        let mut box_a = page_box().with_right(90.0);
        let mut box_b = page_box().with_left(200.0);

        tighten_pair(&a, &b, &mut box_a, &mut box_b, 20.0);

        assert_eq!(box_a.right(), 90.0);
        assert_eq!(box_b.left(), 200.0);
    }

    #[test]
    fn boxes_are_keyed_by_token_not_geometry() {
        let twin = Rect::new(0.0, 0.0, 100.0, 100.0);
        let neighbour = Rect::new(0.0, 150.0, 100.0, 100.0);
        let (t1, t2, n) = (PlacementId(0), PlacementId(1), PlacementId(2));
        let mut boxes = ConstraintBoxes::new(page_box(), [t1, t2, n]);

        boxes.tighten((t1, &twin), (n, &neighbour), 20.0);

        assert_eq!(boxes.get(t1).map(Rect::right), Some(115.0));
        assert_eq!(boxes.get(t2), Some(&page_box()));
    }
}
