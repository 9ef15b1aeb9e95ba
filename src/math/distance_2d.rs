use super::{cross_2d, Point2, Vector2};

/// Returns the closest point to `p` on the segment from `a` to `b`.
///
/// A zero-length segment degenerates to the endpoint `a`.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Returns the squared distance from point `p` to the segment from `a` to `b`.
#[must_use]
pub fn point_to_segment_dist_sq(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - closest_point_on_segment(p, a, b)).norm_squared()
}

/// Returns the minimum distance from point `p` to the segment from `a` to `b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    point_to_segment_dist_sq(p, a, b).sqrt()
}

/// Returns the foot of the perpendicular from `p` onto the infinite line
/// through `origin` with (not necessarily unit) direction `dir`.
///
/// A zero direction degenerates to `origin`.
#[must_use]
pub fn closest_point_on_line(p: &Point2, origin: &Point2, dir: &Vector2) -> Point2 {
    let len_sq = dir.norm_squared();
    if len_sq < 1e-20 {
        return *origin;
    }
    let t = (p - origin).dot(dir) / len_sq;
    origin + dir * t
}

/// Returns the perpendicular distance from `p` to the infinite line through
/// `origin` with direction `dir`.
///
/// A zero direction degenerates to the point-to-point distance.
#[must_use]
pub fn point_to_line_dist(p: &Point2, origin: &Point2, dir: &Vector2) -> f64 {
    let len = dir.norm();
    if len < 1e-10 {
        return (p - origin).norm();
    }
    (cross_2d(dir, &(p - origin)) / len).abs()
}
