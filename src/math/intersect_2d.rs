use super::distance_2d::closest_point_on_line;
use super::{cross_2d, Point2, Vector2, TOLERANCE};

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
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = cross_2d(&da, &db);
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Clips the parametric query `origin + t * dir`, `t ∈ [t_min, t_max]`
/// (bounds may be infinite), against a clockwise convex polygon.
///
/// Returns the surviving parameter interval, or `None` when the query misses
/// the polygon. Each edge contributes the half-plane its outward side bounds;
/// a query collinear with an edge is unconstrained by that edge and ends up
/// clipped by the neighbouring edges to the slab entry/exit points, which
/// are that edge's endpoints.
///
/// Degenerate polygons: a single vertex intersects iff it lies on the query
/// (zero-length interval); two vertices are treated as a segment, and a
/// collinear query yields the overlap interval.
#[must_use]
pub fn clip_to_convex_cw(
    origin: &Point2,
    dir: &Vector2,
    t_min: f64,
    t_max: f64,
    vertices: &[Point2],
) -> Option<(f64, f64)> {
    if dir.norm_squared() < 1e-20 {
        // Zero-length query: nothing can cross the boundary.
        return None;
    }
    let n = vertices.len();
    match n {
        0 => None,
        1 => {
            let v = &vertices[0];
            let foot = closest_point_on_line(v, origin, dir);
            if (v - foot).norm() > TOLERANCE {
                return None;
            }
            let t = (v - origin).dot(dir) / dir.norm_squared();
            (t >= t_min - TOLERANCE && t <= t_max + TOLERANCE)
                .then(|| (t.clamp(t_min, t_max), t.clamp(t_min, t_max)))
        }
        2 => clip_to_segment(origin, dir, t_min, t_max, &vertices[0], &vertices[1]),
        _ => {
            let mut lo = t_min;
            let mut hi = t_max;
            for i in 0..n {
                let a = &vertices[i];
                let b = &vertices[(i + 1) % n];
                let edge = b - a;
                // Outward normal of a clockwise edge (rotate left).
                let normal = Vector2::new(-edge.y, edge.x);
                let denom = normal.dot(dir);
                let num = normal.dot(&(origin - a));
                if denom.abs() < 1e-12 {
                    // Parallel to the edge: fully outside or unconstrained.
                    if num > TOLERANCE {
                        return None;
                    }
                    continue;
                }
                let t = -num / denom;
                if denom > 0.0 {
                    hi = hi.min(t);
                } else {
                    lo = lo.max(t);
                }
                if lo > hi + TOLERANCE {
                    return None;
                }
            }
            if lo > hi {
                return None;
            }
            Some((lo, hi))
        }
    }
}

/// Clips the parametric query against a single segment (degenerate 2-gon).
fn clip_to_segment(
    origin: &Point2,
    dir: &Vector2,
    t_min: f64,
    t_max: f64,
    a: &Point2,
    b: &Point2,
) -> Option<(f64, f64)> {
    let seg = b - a;
    if cross_2d(dir, &seg).abs() < TOLERANCE {
        // Parallel: either collinear (overlap interval) or disjoint.
        if cross_2d(dir, &(a - origin)).abs() > TOLERANCE {
            return None;
        }
        let len_sq = dir.norm_squared();
        let ta = (a - origin).dot(dir) / len_sq;
        let tb = (b - origin).dot(dir) / len_sq;
        let (lo, hi) = if ta <= tb { (ta, tb) } else { (tb, ta) };
        let lo = lo.max(t_min);
        let hi = hi.min(t_max);
        if lo > hi {
            return None;
        }
        return Some((lo, hi));
    }
    let (t, u) = line_line_intersect_2d(origin, dir, a, &seg)?;
    let eps = TOLERANCE;
    if u >= -eps && u <= 1.0 + eps && t >= t_min - eps && t <= t_max + eps {
        let t = t.clamp(t_min, t_max);
        Some((t, t))
    } else {
        None
    }
}
