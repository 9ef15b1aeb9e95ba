use super::Point2;

/// Computes the convex hull of `points` into `out`, in strict clockwise order.
///
/// Andrew's monotone chain over the lexicographically sorted input (`points`
/// is sorted in place; no other storage is touched, so callers can reuse both
/// buffers across invocations). The result:
///
/// - is the unique minimal vertex set of the hull: exactly collinear interior
///   points are dropped, only the extreme occurrences of a collinear run
///   survive, and among exactly coincident points the earliest-buffered one
///   survives;
/// - starts at the lexicographically smallest vertex (smallest x, ties by
///   smallest y) so repeated runs over the same multiset are byte-stable;
/// - degenerates without error: 0 points → empty, all points coincident →
///   a single vertex, all points collinear → the two extremes.
pub fn convex_hull_clockwise_into(points: &mut [Point2], out: &mut Vec<Point2>) {
    out.clear();

    points.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });

    // Lower hull (counter-clockwise), skipping exact duplicates. After the
    // stable sort, duplicates are adjacent and the first occurrence leads.
    let mut prev: Option<Point2> = None;
    let mut unique = 0usize;
    for &p in points.iter() {
        if prev == Some(p) {
            continue;
        }
        prev = Some(p);
        unique += 1;
        while out.len() >= 2 && cross(&out[out.len() - 2], &out[out.len() - 1], &p) <= 0.0 {
            out.pop();
        }
        out.push(p);
    }

    if unique < 3 {
        // Empty, single point, or segment: already in canonical order.
        return;
    }

    // Upper hull, appended after the lower one.
    let lower_len = out.len();
    prev = None;
    for &p in points.iter().rev() {
        if prev == Some(p) {
            continue;
        }
        prev = Some(p);
        while out.len() >= lower_len + 2
            && cross(&out[out.len() - 2], &out[out.len() - 1], &p) <= 0.0
        {
            out.pop();
        }
        out.push(p);
    }
    // Both chains repeat their terminal point.
    out.pop();
    out.remove(lower_len - 1);

    if out.len() < 3 {
        // Collinear input collapses to a segment.
        out.truncate(2);
        return;
    }

    // Counter-clockwise → clockwise, then rotate the lexicographic minimum
    // (the sort's first unique point) back to the front.
    out.reverse();
    let start = lowest_vertex_index(out);
    out.rotate_left(start);
}

/// Index of the lexicographically smallest vertex (smallest x, ties by y).
#[must_use]
pub fn lowest_vertex_index(points: &[Point2]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if p.x < b.x || (p.x == b.x && p.y < b.y) {
            best = i;
        }
    }
    best
}

/// Checks strict clockwise convexity: every consecutive vertex triple turns
/// right, no exact collinear triples. Vacuously true below 3 vertices.
#[must_use]
pub fn is_clockwise_convex(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return true;
    }
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let c = &points[(i + 2) % n];
        if cross(a, b, c) >= 0.0 {
            return false;
        }
    }
    true
}

#[inline]
fn cross(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}
