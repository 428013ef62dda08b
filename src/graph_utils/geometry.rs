//! Pure geometry helpers for hit-testing and edge rendering support.
//!
//! Everything here operates in world coordinates. Hit thresholds are
//! expressed in screen pixels by convention; callers working in world
//! space divide by the current view scale first.

use serde::{Deserialize, Serialize};

/// Hit-test threshold for straight and curved edges, in screen pixels.
/// The threshold does not scale with zoom.
pub const EDGE_HIT_THRESHOLD: f32 = 10.0;

/// Length of each arrowhead barb, in world units.
pub const ARROW_BARB_LEN: f32 = 10.0;

/// Half-angle between an arrowhead barb and the reversed approach
/// direction, in radians (40 degrees).
pub const ARROW_BARB_ANGLE: f32 = 40.0 * std::f32::consts::PI / 180.0;

/// Grid spacing used for snap-to-grid dragging, in world units.
pub const GRID_SPACING: f32 = 10.0;

/// Number of line segments used to approximate a quadratic bezier when
/// measuring distance to it.
pub const BEZIER_SAMPLES: usize = 20;

/// A point in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// True iff the point lies inside (or on the rim of) the circle.
pub fn point_in_circle(px: f32, py: f32, cx: f32, cy: f32, radius: f32) -> bool {
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= radius * radius
}

/// The point on a circle's rim in the direction of `toward`.
///
/// If `toward` coincides with the center the center itself is returned;
/// callers must tolerate a zero-length visual segment (self-loops hit
/// this path).
pub fn boundary_point(cx: f32, cy: f32, radius: f32, toward: Point) -> Point {
    let dx = toward.x - cx;
    let dy = toward.y - cy;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        return Point::new(cx, cy);
    }
    let ratio = radius / dist;
    Point::new(cx + dx * ratio, cy + dy * ratio)
}

/// Distance from `p` to the segment `a`..`b`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let apx = p.x - a.x;
    let apy = p.y - a.y;
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let ab_len2 = abx * abx + aby * aby;
    if ab_len2 <= f32::EPSILON {
        return (apx * apx + apy * apy).sqrt();
    }
    let t = ((apx * abx + apy * aby) / ab_len2).clamp(0.0, 1.0);
    let projx = a.x + abx * t;
    let projy = a.y + aby * t;
    ((p.x - projx).powi(2) + (p.y - projy).powi(2)).sqrt()
}

/// Control point for a quadratic bezier between `a` and `b`.
///
/// The control point sits at the midpoint, displaced along the left-hand
/// normal of the a->b direction by `curvature * |b - a|`. The sign of
/// `curvature` picks the side. Coincident endpoints fall back to a unit
/// length so the displacement stays finite.
pub fn bezier_control_point(a: Point, b: Point, curvature: f32) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        dist = 1.0;
    }
    let midx = (a.x + b.x) * 0.5;
    let midy = (a.y + b.y) * 0.5;
    // Left-hand normal of (dx, dy) with y growing downward.
    let nx = dy / dist;
    let ny = -dx / dist;
    Point::new(midx + nx * curvature * dist, midy + ny * curvature * dist)
}

/// Point on the quadratic bezier a -> ctrl -> b at parameter `t`.
pub fn quad_bezier_point(a: Point, ctrl: Point, b: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let x = u * u * a.x + 2.0 * u * t * ctrl.x + t * t * b.x;
    let y = u * u * a.y + 2.0 * u * t * ctrl.y + t * t * b.y;
    Point::new(x, y)
}

/// Minimum distance from `p` to the quadratic bezier a -> ctrl -> b.
///
/// This is an approximation: the curve is flattened into
/// [`BEZIER_SAMPLES`] segments and the nearest segment distance wins.
/// Accurate enough for pointer hit-testing; not for exact geometry.
pub fn point_bezier_distance(p: Point, a: Point, ctrl: Point, b: Point) -> f32 {
    let mut best = f32::MAX;
    let mut prev = a;
    for i in 1..=BEZIER_SAMPLES {
        let t = i as f32 / BEZIER_SAMPLES as f32;
        let cur = quad_bezier_point(a, ctrl, b, t);
        let d = point_segment_distance(p, prev, cur);
        if d < best {
            best = d;
        }
        prev = cur;
    }
    best
}

/// The two arrowhead barbs for a tip reached from `approach_angle`
/// (radians, direction of travel into the tip). Each barb is a segment
/// from the tip, used for rendering only.
pub fn arrowhead_rays(tip: Point, approach_angle: f32) -> [(Point, Point); 2] {
    let mut rays = [(tip, tip); 2];
    for (j, ray) in rays.iter_mut().enumerate() {
        let rho = approach_angle + ARROW_BARB_ANGLE - j as f32 * 2.0 * ARROW_BARB_ANGLE;
        let end = Point::new(
            tip.x - ARROW_BARB_LEN * rho.cos(),
            tip.y - ARROW_BARB_LEN * rho.sin(),
        );
        *ray = (tip, end);
    }
    rays
}

/// Snap a coordinate to the nearest multiple of [`GRID_SPACING`].
pub fn snap_to_grid(v: f32) -> f32 {
    (v / GRID_SPACING).round() * GRID_SPACING
}
