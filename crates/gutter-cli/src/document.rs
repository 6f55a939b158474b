//! JSON layout documents: a list of pages, each with positioned areas.
//!
//! Numbers stay in their written form (`serde_json::Number` or raw maps) and positions are only
//! decoded for image areas, so a document survives a read/write cycle unchanged apart from the
//! positions of the image areas that were re-fitted.

use gutter::{Layout, LayoutSink, Position, Rect, Solution, SolveOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub const IMAGE_AREA: &str = "imagearea";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_height: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_width: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Number>,
    #[serde(default)]
    pub pages: Vec<DocumentPage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPage {
    pub pagenr: i64,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A positioned element. The position is kept as written and only decoded for image areas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub areatype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const POSITION_KEYS: [&str; 4] = ["top", "left", "height", "width"];

/// Reads top/left/height/width; `None` if any of them is missing or not a number.
fn decode_position(position: &Map<String, Value>) -> Option<Position> {
    let [top, left, height, width] =
        POSITION_KEYS.map(|key| position.get(key).and_then(Value::as_f64));
    Some(Position {
        top: top?,
        left: left?,
        height: height?,
        width: width?,
    })
}

fn number_or(value: &Option<Number>, default: f64) -> f64 {
    value.as_ref().and_then(Number::as_f64).unwrap_or(default)
}

/// Where an image area lives inside a [`LayoutDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaRef {
    pub page: usize,
    pub area: usize,
}

impl LayoutDocument {
    /// Overrides `base` with the page size and margin stored in the document, if any.
    pub fn solve_options(&self, base: SolveOptions) -> SolveOptions {
        SolveOptions {
            page_height: number_or(&self.page_height, base.page_height),
            page_width: number_or(&self.page_width, base.page_width),
            margin: number_or(&self.margin, base.margin),
        }
    }

    /// Collects the image areas of every page into a solver layout.
    ///
    /// Image areas without a position have nothing to re-fit and are left out.
    pub fn image_layout(&self) -> Layout<AreaRef> {
        let mut layout = Layout::new();
        for (page_idx, page) in self.pages.iter().enumerate() {
            for (area_idx, area) in page.areas.iter().enumerate() {
                if area.areatype != IMAGE_AREA {
                    continue;
                }
                let Some(pos) = area.position.as_ref().and_then(decode_position) else {
                    tracing::warn!(
                        page = page.pagenr,
                        area = area_idx,
                        "image area without a numeric position; skipped"
                    );
                    continue;
                };
                let rect = Rect::from(pos);
                layout.add(
                    page.pagenr,
                    rect,
                    Some(AreaRef {
                        page: page_idx,
                        area: area_idx,
                    }),
                );
            }
        }
        tracing::debug!(
            pages = layout.page_count(),
            images = layout.placement_count(),
            "collected image areas"
        );
        layout
    }

    fn position_mut(&mut self, at: AreaRef) -> Option<&mut Map<String, Value>> {
        self.pages
            .get_mut(at.page)?
            .areas
            .get_mut(at.area)?
            .position
            .as_mut()
    }
}

impl LayoutSink<AreaRef> for LayoutDocument {
    fn write_position(&mut self, handle: &AreaRef, position: Position) -> gutter::Result<()> {
        let Some(target) = self.position_mut(*handle) else {
            return Err(gutter::Error::Sink {
                message: format!(
                    "no positioned area {} on page index {}",
                    handle.area, handle.page
                ),
            });
        };
        let values = [position.top, position.left, position.height, position.width];
        for (key, value) in POSITION_KEYS.into_iter().zip(values) {
            target.insert(key.to_string(), Value::from(value));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PlanOut {
    pub page_height: f64,
    pub page_width: f64,
    pub margin: f64,
    pub pages: Vec<PlanPage>,
}

#[derive(Debug, Serialize)]
pub struct PlanPage {
    pub pagenr: i64,
    pub images: Vec<PlanImage>,
}

#[derive(Debug, Serialize)]
pub struct PlanImage {
    pub area: usize,
    pub before: Position,
    pub after: Position,
}

impl PlanOut {
    /// Pairs every image's current geometry with its solved geometry.
    pub fn new(layout: &Layout<AreaRef>, solution: &Solution, options: &SolveOptions) -> Self {
        let pages = layout
            .pages()
            .map(|page| PlanPage {
                pagenr: page.number,
                images: page
                    .placements
                    .iter()
                    .filter_map(|p| {
                        let after = solution.get(page.number, p.id)?;
                        Some(PlanImage {
                            area: p.handle.map_or(p.id.0, |h| h.area),
                            before: p.rect.into(),
                            after: (*after).into(),
                        })
                    })
                    .collect(),
            })
            .collect();
        Self {
            page_height: options.page_height,
            page_width: options.page_width,
            margin: options.margin,
            pages,
        }
    }
}
