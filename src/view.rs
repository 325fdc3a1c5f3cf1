//! Pan/zoom view transform over laid-out geometry.
//!
//! Pure view-space state: adjusting it never touches the record store or
//! triggers re-aggregation. Screen coordinates are derived as
//! `screen = model * scale + pan`.

use crate::layout::{Point, Rect};

/// Conventional per-tick zoom-in factor.
pub const ZOOM_IN_STEP: f64 = 1.1;
/// Conventional per-tick zoom-out factor.
pub const ZOOM_OUT_STEP: f64 = 0.9;

/// Mutable pan/zoom controller owned by the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Uniform scale factor.
    pub scale: f64,
    /// Horizontal pan offset, screen space.
    pub pan_x: f64,
    /// Vertical pan offset, screen space.
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    /// Scales around a model-space pivot, keeping the pivot's screen
    /// position fixed.
    pub fn zoom(&mut self, pivot: Point, factor: f64) {
        let old = self.scale;
        self.scale *= factor;
        self.pan_x += pivot.x * (old - self.scale);
        self.pan_y += pivot.y * (old - self.scale);
    }

    /// Translates the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Maps a model-space point to screen space.
    pub fn to_screen_point(&self, p: Point) -> Point {
        Point {
            x: p.x * self.scale + self.pan_x,
            y: p.y * self.scale + self.pan_y,
        }
    }

    /// Maps a model-space rect to screen space.
    pub fn to_screen_rect(&self, r: &Rect) -> Rect {
        Rect {
            x1: r.x1 * self.scale + self.pan_x,
            y1: r.y1 * self.scale + self.pan_y,
            x2: r.x2 * self.scale + self.pan_x,
            y2: r.y2 * self.scale + self.pan_y,
        }
    }
}
