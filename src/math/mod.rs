pub mod distance_2d;
pub mod hull_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2D rotation type (unit complex number).
pub type Rotation2 = nalgebra::UnitComplex<f64>;

/// 2D rigid transform (rotation + translation).
pub type Isometry2 = nalgebra::Isometry2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// 2D cross product of `a` and `b` (the z component of the 3D cross).
///
/// Positive when `b` lies counter-clockwise of `a`.
#[inline]
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
