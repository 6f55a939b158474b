#![forbid(unsafe_code)]

//! Margin-driven re-fitting of image placements.
//!
//! Given the image rectangles of each page and a margin, `gutter` computes for every image the
//! largest box it may occupy: inside the page inset by the margin, and at least one margin away
//! from every neighbour it sits next to or above/below. The box replaces the image's geometry, so
//! changing the margin grows or shrinks images into the space that becomes available while keeping
//! their relative arrangement.
//!
//! The crate only deals with rectangles. Reading layout files and writing results back is done by
//! the caller through [`Layout`] handles and a [`LayoutSink`].

pub mod apply;
pub mod constraint;
pub mod error;
pub mod interference;
pub mod layout;
pub mod rect;
pub mod solver;

pub use apply::{ApplyReport, LayoutSink, apply_solution};
pub use constraint::{ConstraintBoxes, Separation, tighten_pair};
pub use error::{Error, Result};
pub use interference::{overlaps_horizontally, overlaps_vertically};
pub use layout::{Layout, Page, Placement, PlacementId};
pub use rect::{Axis, Position, Rect};
pub use solver::{PageSolution, Solution, SolveOptions, solve_layout, solve_page};

/// Solves `layout` and writes the result through `sink` in one step.
pub fn refit<H, S>(
    layout: &Layout<H>,
    options: &SolveOptions,
    sink: &mut S,
) -> Result<ApplyReport>
where
    S: LayoutSink<H> + ?Sized,
{
    let solution = solve_layout(layout, options)?;
    apply_solution(layout, &solution, sink)
}
