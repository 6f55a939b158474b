use crate::constraint::ConstraintBoxes;
use crate::error::{Error, Result};
use crate::layout::{Layout, Page, PlacementId};
use crate::rect::Rect;
use indexmap::IndexMap;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOptions {
    pub page_height: f64,
    pub page_width: f64,
    /// Minimum gap between neighbouring placements and between a placement and the page edge.
    pub margin: f64,
}

impl Default for SolveOptions {
    /// A two-page photobook spread, in the layout file's units.
    fn default() -> Self {
        Self {
            page_height: 2900.0,
            page_width: 5800.0,
            margin: 100.0,
        }
    }
}

impl SolveOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(Error::InvalidMargin {
                margin: self.margin,
            });
        }
        if self.page_box().is_degenerate() {
            return Err(Error::PageTooSmall {
                page_height: self.page_height,
                page_width: self.page_width,
                margin: self.margin,
            });
        }
        Ok(())
    }

    /// The page rectangle inset by the margin; every constraint box starts here.
    pub fn page_box(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_height, self.page_width).inset(self.margin)
    }
}

/// Final geometry of every placement on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSolution {
    pub page: i64,
    pub boxes: IndexMap<PlacementId, Rect>,
}

/// Per-page solutions, ordered by page number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    pub pages: BTreeMap<i64, PageSolution>,
}

impl PageSolution {
    /// Boxes squeezed past zero extent by neighbours closer than the margin allows.
    pub fn degenerate_boxes(&self) -> impl Iterator<Item = (PlacementId, &Rect)> {
        self.boxes
            .iter()
            .filter(|(_, rect)| rect.is_degenerate())
            .map(|(id, rect)| (*id, rect))
    }
}

impl Solution {
    pub fn get(&self, page: i64, id: PlacementId) -> Option<&Rect> {
        self.pages.get(&page)?.boxes.get(&id)
    }
}

/// Computes the largest box each placement on `page` may occupy.
///
/// Each box starts as the page inset by the margin and is tightened against every other placement
/// on the page, once per unordered pair. The resulting box replaces the placement's geometry.
pub fn solve_page<H>(page: &Page<H>, options: &SolveOptions) -> Result<PageSolution> {
    options.validate()?;
    for p in &page.placements {
        if p.rect.is_degenerate() {
            return Err(Error::DegenerateRect {
                page: page.number,
                placement: p.id,
                rect: p.rect,
            });
        }
    }

    let mut boxes = ConstraintBoxes::new(
        options.page_box(),
        page.placements.iter().map(|p| p.id),
    );

    let mut constrained_pairs = 0usize;
    for (i, first) in page.placements.iter().enumerate() {
        for second in &page.placements[i + 1..] {
            let sep = boxes.tighten(
                (first.id, &first.rect),
                (second.id, &second.rect),
                options.margin,
            );
            if sep.is_constrained() {
                constrained_pairs += 1;
                tracing::trace!(
                    page = page.number,
                    first = %first.id,
                    second = %second.id,
                    horizontal = sep.horizontal,
                    vertical = sep.vertical,
                    "pair constrained"
                );
            }
        }
    }

    let n = page.placements.len();
    tracing::debug!(
        page = page.number,
        placements = n,
        pairs = n * n.saturating_sub(1) / 2,
        constrained_pairs,
        "page solved"
    );

    let solved = PageSolution {
        page: page.number,
        boxes: boxes.into_inner(),
    };
    for (id, rect) in solved.degenerate_boxes() {
        tracing::warn!(
            page = page.number,
            placement = %id,
            rect = %rect,
            "constraint box is inverted; neighbours are closer than the margin"
        );
    }
    Ok(solved)
}

/// Solves every page of `layout` independently.
pub fn solve_layout<H>(layout: &Layout<H>, options: &SolveOptions) -> Result<Solution> {
    options.validate()?;
    let mut solution = Solution::default();
    for page in layout.pages() {
        solution.pages.insert(page.number, solve_page(page, options)?);
    }
    Ok(solution)
}
