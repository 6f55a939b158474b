use crate::rect::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identity token of one placement, issued by [`Layout::add`].
///
/// Solver state and results are keyed by this token, never by geometry, so two placements with
/// identical coordinates stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlacementId(pub usize);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One image's rectangle on a page, plus the handle of the element that should receive the
/// solved geometry (if any).
#[derive(Debug, Clone)]
pub struct Placement<H> {
    pub id: PlacementId,
    pub rect: Rect,
    pub handle: Option<H>,
}

#[derive(Debug, Clone)]
pub struct Page<H> {
    pub number: i64,
    pub placements: Vec<Placement<H>>,
}

impl<H> Page<H> {
    pub fn placement(&self, id: PlacementId) -> Option<&Placement<H>> {
        self.placements.iter().find(|p| p.id == id)
    }
}

/// All image placements of a document, grouped by page number.
#[derive(Debug, Clone)]
pub struct Layout<H> {
    pages: BTreeMap<i64, Page<H>>,
    next_id: usize,
}

impl<H> Default for Layout<H> {
    fn default() -> Self {
        Self {
            pages: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<H> Layout<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a placement on `page` and returns its token.
    pub fn add(&mut self, page: i64, rect: Rect, handle: Option<H>) -> PlacementId {
        let id = PlacementId(self.next_id);
        self.next_id += 1;
        self.pages
            .entry(page)
            .or_insert_with(|| Page {
                number: page,
                placements: Vec::new(),
            })
            .placements
            .push(Placement { id, rect, handle });
        id
    }

    pub fn page(&self, number: i64) -> Option<&Page<H>> {
        self.pages.get(&number)
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page<H>> {
        self.pages.values()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn placement_count(&self) -> usize {
        self.pages.values().map(|p| p.placements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
