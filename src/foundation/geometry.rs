//! Rotation helpers shared by hit testing, debug outlines and arrow geometry.
//!
//! Convention: angles are radians, positive angles turn **clockwise** on a Y-down surface, and a
//! node rotates about its own origin (the top-left corner of its unrotated rect).

use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};

/// Distance from an edge under which a point of a rotated rect still counts as "on" the edge.
///
/// Rotating into local space rounds, so for rotated rects the open interior is shrunk by this
/// amount on every side. Unrotated rects map exactly and use no tolerance.
pub const EDGE_EPSILON: f64 = 1e-9;

/// Rotate `p` about `pivot` by `angle`.
pub fn rotate_about(p: Point, pivot: Point, angle: f64) -> Point {
    if angle == 0.0 {
        return p;
    }
    pivot + (Affine::rotate(angle) * (p - pivot).to_point()).to_vec2()
}

/// Map a surface point into the unrotated space of a rect rotated by `angle` about its origin.
pub fn to_local(p: Point, rect: Rect, angle: f64) -> Point {
    rotate_about(p, rect.origin(), -angle)
}

/// Map a point from the unrotated space of `rect` back onto the surface.
pub fn to_surface(local: Point, rect: Rect, angle: f64) -> Point {
    rotate_about(local, rect.origin(), angle)
}

/// Open-interval containment: points on an edge, or within `tolerance` of one, are outside.
pub fn open_contains(rect: Rect, local: Point, tolerance: f64) -> bool {
    local.x > rect.x0 + tolerance
        && local.x < rect.x1 - tolerance
        && local.y > rect.y0 + tolerance
        && local.y < rect.y1 - tolerance
}

/// Hit test a rect rotated by `angle` about its origin.
///
/// Uses [`EDGE_EPSILON`] as the edge tolerance unless `angle` is zero.
pub fn rotated_rect_contains(rect: Rect, angle: f64, p: Point) -> bool {
    let tolerance = if angle == 0.0 { 0.0 } else { EDGE_EPSILON };
    open_contains(rect, to_local(p, rect, angle), tolerance)
}

/// Corners of a rotated rect in surface space, clockwise from the origin corner.
pub fn rotated_corners(rect: Rect, angle: f64) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
    .map(|c| to_surface(c, rect, angle))
}

/// Closed outline of a rotated rect.
pub fn rotated_outline(rect: Rect, angle: f64) -> BezPath {
    let corners = rotated_corners(rect, angle);
    let mut path = BezPath::new();
    path.move_to(corners[0]);
    for &c in &corners[1..] {
        path.line_to(c);
    }
    path.close_path();
    path
}

/// Vector of length `len` pointing along `angle`.
pub fn polar(len: f64, angle: f64) -> Vec2 {
    Vec2::new(len * angle.cos(), len * angle.sin())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
