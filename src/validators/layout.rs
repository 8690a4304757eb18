//! Grid Geometry
//!
//! Axis-aligned rectangles on the 40-column dashboard grid, and the overlap
//! check run over every tab's layout.

/// A placed widget: `x`/`y` of the top-left cell, `w`/`h` in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Rect {
    pub const fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.h)
    }

    /// Interiors intersect. Rectangles that only share an edge do not.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Every intersecting pair `(i, j)` with `i < j`, ordered by `i` then `j`.
///
/// Layouts hold a handful of widgets per tab, so a pairwise scan is all
/// that is needed.
pub fn overlapping_pairs(rects: &[Rect]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in rects.iter().enumerate() {
        for (j, b) in rects.iter().enumerate().skip(i + 1) {
            if a.intersects(b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
