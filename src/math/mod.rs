pub mod distance_2d;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// 2D cross product (z-component of the 3D cross product).
///
/// Positive when `b` lies counter-clockwise of `a`.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Left-hand perpendicular of a vector: rotates 90° counter-clockwise.
#[must_use]
pub fn perp_left(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}
