use crate::layout::PlacementId;
use crate::rect::Rect;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unknown axis code {code:?}; expected one of 'T', 'L', 'B', 'R', 'H', 'W'")]
    InvalidAxisCode { code: char },

    #[error("page {page}: placement {placement} has degenerate geometry {rect}")]
    DegenerateRect {
        page: i64,
        placement: PlacementId,
        rect: Rect,
    },

    #[error("margin must be a finite, non-negative number (got {margin})")]
    InvalidMargin { margin: f64 },

    #[error("page {page_width}x{page_height} leaves no room inside a margin of {margin}")]
    PageTooSmall {
        page_height: f64,
        page_width: f64,
        margin: f64,
    },

    #[error("page {page}: solution refers to unknown placement {placement}")]
    UnknownPlacement { page: i64, placement: PlacementId },

    #[error("layout sink rejected a write: {message}")]
    Sink { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
