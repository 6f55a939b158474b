use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::rect::Position;
use crate::solver::Solution;

/// Receives solved geometry for the element behind a placement handle.
///
/// Implementations overwrite the element's top/left/height/width in place. Any closure of the
/// form `FnMut(&H, Position) -> Result<()>` is a sink.
pub trait LayoutSink<H> {
    fn write_position(&mut self, handle: &H, position: Position) -> Result<()>;
}

impl<H, F> LayoutSink<H> for F
where
    F: FnMut(&H, Position) -> Result<()>,
{
    fn write_position(&mut self, handle: &H, position: Position) -> Result<()> {
        self(handle, position)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub written: usize,
    /// Placements without a handle; nothing to write for them.
    pub skipped: usize,
}

/// Writes every solved box back through its placement's handle.
pub fn apply_solution<H, S>(
    layout: &Layout<H>,
    solution: &Solution,
    sink: &mut S,
) -> Result<ApplyReport>
where
    S: LayoutSink<H> + ?Sized,
{
    let mut report = ApplyReport::default();
    for (&number, page_solution) in &solution.pages {
        let page = layout.page(number);
        for (&id, rect) in &page_solution.boxes {
            let Some(placement) = page.and_then(|p| p.placement(id)) else {
                return Err(Error::UnknownPlacement {
                    page: number,
                    placement: id,
                });
            };
            match &placement.handle {
                Some(handle) => {
                    sink.write_position(handle, Position::from(*rect))?;
                    report.written += 1;
                }
                None => {
                    tracing::trace!(page = number, placement = %id, "no handle; skipped");
                    report.skipped += 1;
                }
            }
        }
    }
    tracing::debug!(
        written = report.written,
        skipped = report.skipped,
        "solution applied"
    );
    Ok(report)
}
