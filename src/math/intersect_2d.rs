use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Intersection point of two lines, or `None` if parallel/collinear.
#[must_use]
pub fn line_line_point_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<Point2> {
    let (t, _u) = line_line_intersect_2d(p1, d1, p2, d2)?;
    Some(point_at(p1, d1, t))
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    Point2::new(origin.x + dir.x * t, origin.y + dir.y * t)
}
