//! Planar geometry used by the pose classifier.
//!
//! Angles are unsigned interior angles in degrees; windows are inclusive.

use crate::shared::point::Point2D;

/// Euclidean distance between two points.
pub fn distance(p1: Point2D, p2: Point2D) -> f64 {
    (p1.x - p2.x).hypot(p1.y - p2.y)
}

/// Angle at vertex `b` between rays `b→a` and `b→c`, in `[0, 180]` degrees.
///
/// Takes the difference of the two `atan2` bearings and folds anything
/// above 180° back to `360 - angle`. A zero-length ray still yields a
/// number (its bearing is 0), but that number means nothing; use
/// [`checked_angle_at_vertex`] when inputs may be degenerate.
pub fn angle_at_vertex(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Like [`angle_at_vertex`], but `None` for zero-length rays or
/// non-finite coordinates.
pub fn checked_angle_at_vertex(a: Point2D, b: Point2D, c: Point2D) -> Option<f64> {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) || a == b || c == b {
        return None;
    }
    Some(angle_at_vertex(a, b, c))
}

/// Inclusive symmetric window test: `target - tolerance <= actual <= target + tolerance`.
pub fn in_tolerance(actual: f64, target: f64, tolerance: f64) -> bool {
    target - tolerance <= actual && actual <= target + tolerance
}
