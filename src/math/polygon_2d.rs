use super::distance_2d::{closest_point_on_segment, point_to_line_dist, point_to_segment_dist, point_to_segment_dist_sq};
use super::{cross_2d, Point2, Vector2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the area-weighted centroid of a polygon.
///
/// Degenerate cases: no vertices → `None`, a single vertex → that vertex,
/// two vertices → the midpoint. For near-zero area the vertex average is
/// returned instead of dividing by the vanishing area.
#[must_use]
pub fn centroid_2d(points: &[Point2]) -> Option<Point2> {
    match points.len() {
        0 => None,
        1 => Some(points[0]),
        2 => Some(Point2::new(
            (points[0].x + points[1].x) * 0.5,
            (points[0].y + points[1].y) * 0.5,
        )),
        n => {
            let area = signed_area_2d(points);
            if area.abs() < 1e-15 {
                let mut cx = 0.0;
                let mut cy = 0.0;
                for p in points {
                    cx += p.x;
                    cy += p.y;
                }
                #[allow(clippy::cast_precision_loss)]
                return Some(Point2::new(cx / n as f64, cy / n as f64));
            }
            let mut cx = 0.0;
            let mut cy = 0.0;
            for i in 0..n {
                let j = (i + 1) % n;
                let w = points[i].x * points[j].y - points[j].x * points[i].y;
                cx += (points[i].x + points[j].x) * w;
                cy += (points[i].y + points[j].y) * w;
            }
            Some(Point2::new(cx / (6.0 * area), cy / (6.0 * area)))
        }
    }
}

/// Point-in-convex-polygon test for clockwise-wound vertices.
///
/// The interior lies to the right of every directed edge; `epsilon` is a
/// distance slack that grows (positive) or shrinks (negative) the polygon.
/// With `epsilon = 0` the boundary is inclusive. Degenerate cases: empty →
/// `false`; one or two vertices → within `epsilon` of the vertex/segment.
#[must_use]
pub fn is_point_inside_convex_cw(p: &Point2, vertices: &[Point2], epsilon: f64) -> bool {
    match vertices.len() {
        0 => false,
        1 => (p - vertices[0]).norm() <= epsilon,
        2 => point_to_segment_dist(p, &vertices[0], &vertices[1]) <= epsilon,
        n => {
            for i in 0..n {
                let a = &vertices[i];
                let b = &vertices[(i + 1) % n];
                let edge = b - a;
                // Perpendicular offset, positive on the outward (left) side.
                let offset = cross_2d(&edge, &(p - a)) / edge.norm();
                if offset > epsilon {
                    return false;
                }
            }
            true
        }
    }
}

/// Signed distance from `p` to a clockwise convex polygon: negative inside,
/// positive outside, zero on the boundary.
///
/// Degenerate cases: empty → `f64::INFINITY`; one or two vertices → the
/// (non-negative) distance to the vertex/segment.
#[must_use]
pub fn signed_distance_convex_cw(p: &Point2, vertices: &[Point2]) -> f64 {
    match vertices.len() {
        0 => f64::INFINITY,
        1 => (p - vertices[0]).norm(),
        2 => point_to_segment_dist(p, &vertices[0], &vertices[1]),
        n => {
            let mut min_dist = f64::INFINITY;
            let mut outside = false;
            for i in 0..n {
                let a = &vertices[i];
                let b = &vertices[(i + 1) % n];
                if cross_2d(&(b - a), &(p - a)) > 0.0 {
                    outside = true;
                }
                let d = point_to_segment_dist(p, a, b);
                if d < min_dist {
                    min_dist = d;
                }
            }
            if outside {
                min_dist
            } else {
                -min_dist
            }
        }
    }
}

/// Index of the vertex closest to `p`, ties broken by the lowest index.
#[must_use]
pub fn closest_vertex_index(p: &Point2, vertices: &[Point2]) -> Option<usize> {
    if vertices.is_empty() {
        return None;
    }
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, v) in vertices.iter().enumerate() {
        let d = (p - v).norm_squared();
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    Some(best)
}

/// Index of the vertex closest to the line through `origin` with direction
/// `dir` (perpendicular distance), ties broken by the lowest index.
#[must_use]
pub fn closest_vertex_index_to_line(
    origin: &Point2,
    dir: &Vector2,
    vertices: &[Point2],
) -> Option<usize> {
    if vertices.is_empty() {
        return None;
    }
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, v) in vertices.iter().enumerate() {
        let d = point_to_line_dist(v, origin, dir);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    Some(best)
}

/// Index of the edge closest to `p`, ties broken by the lowest index.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1` (mod n). A two-vertex
/// polygon has the single edge 0; fewer vertices have no edge.
#[must_use]
pub fn closest_edge_index(p: &Point2, vertices: &[Point2]) -> Option<usize> {
    let n = vertices.len();
    if n < 2 {
        return None;
    }
    if n == 2 {
        return Some(0);
    }
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for i in 0..n {
        let d = point_to_segment_dist_sq(p, &vertices[i], &vertices[(i + 1) % n]);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    Some(best)
}

/// Inclusive clockwise index range `[start, end]` of the vertices of a
/// clockwise convex polygon visible from an external `observer`.
///
/// An edge is visible iff the observer lies strictly on its outward side; a
/// vertex is visible iff at least one adjacent edge is. Returns `None` when
/// no edge is strictly visible: observer inside, on the boundary, or
/// collinear with a degenerate two-vertex polygon. An observer exactly on an
/// edge's extension does not see that edge (strict outward-side test).
#[must_use]
pub fn line_of_sight_indices(observer: &Point2, vertices: &[Point2]) -> Option<(usize, usize)> {
    let n = vertices.len();
    match n {
        0 => None,
        1 => {
            if (observer - vertices[0]).norm() < 1e-20 {
                None
            } else {
                Some((0, 0))
            }
        }
        2 => {
            let side = cross_2d(&(vertices[1] - vertices[0]), &(observer - vertices[0]));
            if side > 0.0 {
                Some((0, 1))
            } else if side < 0.0 {
                Some((1, 0))
            } else {
                None
            }
        }
        _ => {
            let visible = |i: usize| -> bool {
                let a = &vertices[i];
                let b = &vertices[(i + 1) % n];
                cross_2d(&(b - a), &(observer - a)) > 0.0
            };
            let mut start = None;
            let mut end = None;
            for i in 0..n {
                let prev = (i + n - 1) % n;
                if visible(i) && !visible(prev) {
                    start = Some(i);
                }
                if visible(i) && !visible((i + 1) % n) {
                    end = Some((i + 1) % n);
                }
            }
            match (start, end) {
                (Some(s), Some(e)) => Some((s, e)),
                _ => None,
            }
        }
    }
}

/// Orthogonal projection of `p` onto a clockwise convex polygon.
///
/// Returns the closest boundary point when `p` is outside, and `p` itself
/// when `p` is inside or on the boundary. Empty polygon → `None`.
#[must_use]
pub fn orthogonal_projection_convex_cw(p: &Point2, vertices: &[Point2]) -> Option<Point2> {
    let n = vertices.len();
    match n {
        0 => None,
        1 => Some(vertices[0]),
        2 => Some(closest_point_on_segment(p, &vertices[0], &vertices[1])),
        _ => {
            if is_point_inside_convex_cw(p, vertices, 0.0) {
                return Some(*p);
            }
            let mut best = closest_point_on_segment(p, &vertices[0], &vertices[1]);
            let mut best_dist = (p - best).norm_squared();
            for i in 1..n {
                let c = closest_point_on_segment(p, &vertices[i], &vertices[(i + 1) % n]);
                let d = (p - c).norm_squared();
                if d < best_dist {
                    best_dist = d;
                    best = c;
                }
            }
            Some(best)
        }
    }
}
