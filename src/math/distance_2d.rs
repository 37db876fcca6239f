use super::{Point2, Vector2, TOLERANCE};

/// Projection of point `p` onto the segment `a → b`.
///
/// Returns `(t, dist)` where `t` is the *unclamped* parameter along the
/// segment (0 at `a`, 1 at `b`) and `dist` is the perpendicular distance
/// from `p` to the infinite line through the segment.
///
/// For a degenerate (zero-length) segment, returns `t = 0` and the
/// point-to-point distance.
#[must_use]
pub fn project_on_segment(p: &Point2, a: &Point2, b: &Point2) -> (f64, f64) {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return (0.0, (p - a).norm());
    }
    let ap = p - a;
    let t = ap.dot(&d) / len_sq;
    // Perpendicular distance via the cross product with the unit direction.
    let dist = (ap.x * d.y - ap.y * d.x).abs() / len_sq.sqrt();
    (t, dist)
}

/// Returns the minimum distance from point `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    let closest = a + d * t;
    (p - closest).norm()
}

/// Signed parameter of `p` along the ray `origin + t * dir` (`dir` unit length).
#[must_use]
pub fn param_along(p: &Point2, origin: &Point2, dir: &Vector2) -> f64 {
    (p - origin).dot(dir)
}
