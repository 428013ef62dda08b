//! Screen/world coordinate mapping under a zoom scale and pan offset.

use crate::graph_utils::geometry::Point;

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 5.0;

/// Zoom step applied per wheel notch.
pub const ZOOM_FACTOR: f32 = 1.1;

/// View transform: `screen = world * scale + translate`.
///
/// Pure synchronous arithmetic; the host feeds it raw pointer/wheel
/// events and reads back world coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    translate_x: f32,
    translate_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        ViewTransform::default()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translate(&self) -> (f32, f32) {
        (self.translate_x, self.translate_y)
    }

    pub fn screen_to_world(&self, sx: f32, sy: f32) -> Point {
        Point::new(
            (sx - self.translate_x) / self.scale,
            (sy - self.translate_y) / self.scale,
        )
    }

    pub fn world_to_screen(&self, wx: f32, wy: f32) -> Point {
        Point::new(
            wx * self.scale + self.translate_x,
            wy * self.scale + self.translate_y,
        )
    }

    /// Zoom anchored at the cursor: the world point under (sx, sy) stays
    /// under the cursor after rescaling.
    pub fn zoom_at(&mut self, sx: f32, sy: f32, zoom_in: bool) {
        let anchor = self.screen_to_world(sx, sy);
        let factor = if zoom_in {
            ZOOM_FACTOR
        } else {
            1.0 / ZOOM_FACTOR
        };
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.translate_x = sx - anchor.x * self.scale;
        self.translate_y = sy - anchor.y * self.scale;
    }

    /// Pan by raw screen-space deltas. Not scaled.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.translate_x += dx;
        self.translate_y += dy;
    }

    pub fn reset(&mut self) {
        *self = ViewTransform::default();
    }
}
