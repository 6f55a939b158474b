use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six values a [`Rect`] can be addressed by.
///
/// Each axis value has a single-letter code (`T`, `L`, `B`, `R`, `H`, `W`) so generic code can
/// refer to an edge or extent by symbol instead of by accessor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Top,
    Left,
    Bottom,
    Right,
    Height,
    Width,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::Top,
        Axis::Left,
        Axis::Bottom,
        Axis::Right,
        Axis::Height,
        Axis::Width,
    ];

    pub fn code(self) -> char {
        match self {
            Axis::Top => 'T',
            Axis::Left => 'L',
            Axis::Bottom => 'B',
            Axis::Right => 'R',
            Axis::Height => 'H',
            Axis::Width => 'W',
        }
    }
}

impl TryFrom<char> for Axis {
    type Error = Error;

    fn try_from(code: char) -> Result<Self> {
        match code {
            'T' => Ok(Axis::Top),
            'L' => Ok(Axis::Left),
            'B' => Ok(Axis::Bottom),
            'R' => Ok(Axis::Right),
            'H' => Ok(Axis::Height),
            'W' => Ok(Axis::Width),
            _ => Err(Error::InvalidAxisCode { code }),
        }
    }
}

/// An axis-aligned rectangle in page units.
///
/// Stored as edges; height and width are derived. Values are immutable: every `with_*` method
/// returns a new rectangle. Changing the height or width keeps the top/left origin in place and
/// moves the bottom/right edge.
///
/// No ordering invariant is enforced here. Use [`Rect::is_degenerate`] to detect inverted or
/// non-finite geometry before handing rectangles to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "Position", from = "Position")]
pub struct Rect {
    top: f64,
    left: f64,
    bottom: f64,
    right: f64,
}

impl Rect {
    /// Builds a rectangle from its origin and extent.
    pub fn new(top: f64, left: f64, height: f64, width: f64) -> Self {
        Self {
            top,
            left,
            bottom: top + height,
            right: left + width,
        }
    }

    pub fn from_edges(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn with_top(self, top: f64) -> Self {
        Self { top, ..self }
    }

    pub fn with_left(self, left: f64) -> Self {
        Self { left, ..self }
    }

    pub fn with_bottom(self, bottom: f64) -> Self {
        Self { bottom, ..self }
    }

    pub fn with_right(self, right: f64) -> Self {
        Self { right, ..self }
    }

    pub fn with_height(self, height: f64) -> Self {
        Self {
            bottom: self.top + height,
            ..self
        }
    }

    pub fn with_width(self, width: f64) -> Self {
        Self {
            right: self.left + width,
            ..self
        }
    }

    pub fn value(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Top => self.top,
            Axis::Left => self.left,
            Axis::Bottom => self.bottom,
            Axis::Right => self.right,
            Axis::Height => self.height(),
            Axis::Width => self.width(),
        }
    }

    pub fn with(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Top => self.with_top(value),
            Axis::Left => self.with_left(value),
            Axis::Bottom => self.with_bottom(value),
            Axis::Right => self.with_right(value),
            Axis::Height => self.with_height(value),
            Axis::Width => self.with_width(value),
        }
    }

    /// Reads a value by its single-letter code (`T`, `L`, `B`, `R`, `H`, `W`).
    pub fn get(&self, code: char) -> Result<f64> {
        Ok(self.value(Axis::try_from(code)?))
    }

    /// Returns a copy with the value named by `code` replaced.
    pub fn set(self, code: char, value: f64) -> Result<Self> {
        Ok(self.with(Axis::try_from(code)?, value))
    }

    /// Shrinks the rectangle by `amount` on every side.
    pub fn inset(self, amount: f64) -> Self {
        Self {
            top: self.top + amount,
            left: self.left + amount,
            bottom: self.bottom - amount,
            right: self.right - amount,
        }
    }

    /// `true` for inverted edges (`top > bottom` or `left > right`) or any non-finite edge.
    pub fn is_degenerate(&self) -> bool {
        let finite = self.top.is_finite()
            && self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite();
        !finite || self.top > self.bottom || self.left > self.right
    }

    /// `true` if `other` lies entirely inside `self` (shared edges allowed).
    pub fn contains(&self, other: &Rect) -> bool {
        other.top >= self.top
            && other.left >= self.left
            && other.bottom <= self.bottom
            && other.right <= self.right
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TLBR=({}, {}, {}, {})    TLHW=({}, {}, {}, {})",
            self.top,
            self.left,
            self.bottom,
            self.right,
            self.top,
            self.left,
            self.height(),
            self.width()
        )
    }
}

/// Origin + extent form, as layout descriptions store element positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub width: f64,
}

impl From<Rect> for Position {
    fn from(r: Rect) -> Self {
        Self {
            top: r.top,
            left: r.left,
            height: r.height(),
            width: r.width(),
        }
    }
}

impl From<Position> for Rect {
    fn from(p: Position) -> Self {
        Rect::new(p.top, p.left, p.height, p.width)
    }
}
