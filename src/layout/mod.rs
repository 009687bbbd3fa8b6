pub mod axes;
pub mod page;
pub mod tiling;

pub use axes::{AxisBounds, PlotTransform};
pub use page::{compute_page_layout, PageContent, PageLayout};
pub use tiling::{compute_tiling, TileCell, Tiling};

/// A positioned rectangle in screen pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl LayoutRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `d` on every side, never below zero size.
    pub fn inset(&self, d: f32) -> Self {
        Self {
            x: self.x + d,
            y: self.y + d,
            w: (self.w - 2.0 * d).max(0.0),
            h: (self.h - 2.0 * d).max(0.0),
        }
    }

    /// Shift vertically, used to apply the page scroll offset.
    pub fn offset_y(&self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..*self
        }
    }

    /// `[x1, y1, x2, y2]`, the form hit regions are stored in.
    pub fn bounds(&self) -> [f32; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }
}
