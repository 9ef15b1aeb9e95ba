use crate::error::Result;
use crate::frame::InFrame;
use crate::math::intersect_2d::clip_to_convex_cw;
use crate::math::{polygon_2d, Point2, Vector2, TOLERANCE};

use super::super::{FrameLine2, FrameLineSegment2, FramePoint2};
use super::FrameConvexPolygon2;

impl FrameConvexPolygon2 {
    /// Returns a copy of vertex `index` (clockwise order), or `None` when the
    /// index is out of range.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale.
    pub fn vertex(&self, index: usize) -> Result<Option<FramePoint2>> {
        self.ensure_up_to_date()?;
        Ok(self
            .vertices
            .get(index)
            .map(|v| FramePoint2::from_point(self.frame(), *v)))
    }

    /// Returns the area-weighted centroid, or `None` for an empty polygon.
    /// A point polygon's centroid is the vertex, a segment's the midpoint.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale.
    pub fn centroid(&self) -> Result<Option<FramePoint2>> {
        self.ensure_up_to_date()?;
        Ok(self
            .centroid
            .map(|c| FramePoint2::from_point(self.frame(), c)))
    }

    /// Packs the centroid into `out`, relabelling its frame to the
    /// polygon's. Returns `false` (leaving `out` untouched) for an empty
    /// polygon. Garbage-free.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale.
    pub fn centroid_in(&self, out: &mut FramePoint2) -> Result<bool> {
        self.ensure_up_to_date()?;
        match self.centroid {
            Some(c) => {
                out.pack(self.frame(), c);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns the polygon area; zero for empty, point, and segment
    /// polygons.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale.
    pub fn area(&self) -> Result<f64> {
        self.ensure_up_to_date()?;
        Ok(self.area)
    }

    /// Point containment with an exact (zero-tolerance, boundary-inclusive)
    /// half-plane test. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn is_point_inside(&self, point: &FramePoint2) -> Result<bool> {
        self.is_point_inside_eps(point, 0.0)
    }

    /// Point containment with a distance slack: positive `epsilon` grows the
    /// polygon, negative shrinks it. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn is_point_inside_eps(&self, point: &FramePoint2, epsilon: f64) -> Result<bool> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(point)?;
        Ok(polygon_2d::is_point_inside_convex_cw(
            point.point(),
            &self.vertices,
            epsilon,
        ))
    }

    /// Signed distance to the polygon boundary: negative inside, positive
    /// outside, zero on the boundary. Strict. Empty polygon →
    /// `f64::INFINITY`; point and segment polygons have no interior.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn signed_distance(&self, point: &FramePoint2) -> Result<f64> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(point)?;
        Ok(polygon_2d::signed_distance_convex_cw(
            point.point(),
            &self.vertices,
        ))
    }

    /// Distance to the polygon: zero inside or on the boundary. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn distance(&self, point: &FramePoint2) -> Result<f64> {
        Ok(self.signed_distance(point)?.max(0.0))
    }

    /// Index of the vertex closest to `point`, ties broken by the lowest
    /// index; `None` for an empty polygon. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn closest_vertex_index(&self, point: &FramePoint2) -> Result<Option<usize>> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(point)?;
        Ok(polygon_2d::closest_vertex_index(point.point(), &self.vertices))
    }

    /// Copy of the vertex closest to `point`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn closest_vertex(&self, point: &FramePoint2) -> Result<Option<FramePoint2>> {
        Ok(self
            .closest_vertex_index(point)?
            .map(|i| FramePoint2::from_point(self.frame(), self.vertices[i])))
    }

    /// Copy of the vertex closest to `line` (perpendicular distance), ties
    /// broken by the lowest index. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `line` is in a different frame.
    pub fn closest_vertex_to_line(&self, line: &FrameLine2) -> Result<Option<FramePoint2>> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(line)?;
        Ok(
            polygon_2d::closest_vertex_index_to_line(line.origin(), line.direction(), &self.vertices)
                .map(|i| FramePoint2::from_point(self.frame(), self.vertices[i])),
        )
    }

    /// Copy of the edge closest to `point`, ties broken by the lowest edge
    /// index; `None` below two vertices. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn closest_edge(&self, point: &FramePoint2) -> Result<Option<FrameLineSegment2>> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(point)?;
        let n = self.vertices.len();
        Ok(polygon_2d::closest_edge_index(point.point(), &self.vertices).map(|i| {
            FrameLineSegment2::new(self.frame(), self.vertices[i], self.vertices[(i + 1) % n])
        }))
    }

    /// Inclusive clockwise index range `[start, end]` of the vertices
    /// visible from an external `observer`: a vertex is visible iff at least
    /// one adjacent edge has the observer strictly on its outward side.
    /// Strict. `None` when the observer is inside, on the boundary, or on an
    /// edge's extension such that no edge is strictly visible.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `observer` is in a different frame.
    pub fn line_of_sight_indices(&self, observer: &FramePoint2) -> Result<Option<(usize, usize)>> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(observer)?;
        Ok(polygon_2d::line_of_sight_indices(
            observer.point(),
            &self.vertices,
        ))
    }

    /// Copies of the first and last visible vertex, per
    /// [`line_of_sight_indices`](Self::line_of_sight_indices). Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `observer` is in a different frame.
    pub fn line_of_sight_vertices(
        &self,
        observer: &FramePoint2,
    ) -> Result<Option<(FramePoint2, FramePoint2)>> {
        Ok(self.line_of_sight_indices(observer)?.map(|(start, end)| {
            (
                FramePoint2::from_point(self.frame(), self.vertices[start]),
                FramePoint2::from_point(self.frame(), self.vertices[end]),
            )
        }))
    }

    /// Intersections of an infinite line with the polygon: `None` for a
    /// miss, one point for a tangency, two for a crossing. A line collinear
    /// with an edge reports that edge's endpoints (slab entry/exit). Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `line` is in a different frame.
    pub fn intersection_with_line(
        &self,
        line: &FrameLine2,
    ) -> Result<Option<(FramePoint2, Option<FramePoint2>)>> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(line)?;
        Ok(self
            .clip_query(line.origin(), line.direction(), f64::NEG_INFINITY, f64::INFINITY)
            .map(|(a, b)| self.lift_pair(a, b)))
    }

    /// Pack-style [`intersection_with_line`](Self::intersection_with_line):
    /// writes up to two points into caller storage, relabelling their frames
    /// to the polygon's, and returns how many were written. Untouched
    /// outputs keep their previous value. Garbage-free.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `line` is in a different frame.
    pub fn intersection_with_line_in(
        &self,
        line: &FrameLine2,
        first: &mut FramePoint2,
        second: &mut FramePoint2,
    ) -> Result<usize> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(line)?;
        let hit =
            self.clip_query(line.origin(), line.direction(), f64::NEG_INFINITY, f64::INFINITY);
        Ok(self.pack_pair(hit, first, second))
    }

    /// Intersections of a ray (`origin + t * direction`, `t >= 0`) with the
    /// polygon. Same conventions as
    /// [`intersection_with_line`](Self::intersection_with_line); only
    /// boundary crossings count, so a ray starting inside yields its single
    /// exit point. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `ray` is in a different frame.
    pub fn intersection_with_ray(
        &self,
        ray: &FrameLine2,
    ) -> Result<Option<(FramePoint2, Option<FramePoint2>)>> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(ray)?;
        Ok(self
            .clip_query(ray.origin(), ray.direction(), 0.0, f64::INFINITY)
            .map(|(a, b)| self.lift_pair(a, b)))
    }

    /// Pack-style [`intersection_with_ray`](Self::intersection_with_ray).
    /// Garbage-free.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `ray` is in a different frame.
    pub fn intersection_with_ray_in(
        &self,
        ray: &FrameLine2,
        first: &mut FramePoint2,
        second: &mut FramePoint2,
    ) -> Result<usize> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(ray)?;
        let hit = self.clip_query(ray.origin(), ray.direction(), 0.0, f64::INFINITY);
        Ok(self.pack_pair(hit, first, second))
    }

    /// Intersections of a bounded segment with the polygon. Same conventions
    /// as [`intersection_with_line`](Self::intersection_with_line); only
    /// boundary crossings count, so segment endpoints strictly inside the
    /// polygon contribute nothing and a fully interior segment yields
    /// `None`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `segment` is in a different frame.
    pub fn intersection_with_segment(
        &self,
        segment: &FrameLineSegment2,
    ) -> Result<Option<(FramePoint2, Option<FramePoint2>)>> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(segment)?;
        let dir = segment.second() - segment.first();
        Ok(self
            .clip_query(segment.first(), &dir, 0.0, 1.0)
            .map(|(a, b)| self.lift_pair(a, b)))
    }

    /// Pack-style
    /// [`intersection_with_segment`](Self::intersection_with_segment).
    /// Garbage-free.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `segment` is in a different frame.
    pub fn intersection_with_segment_in(
        &self,
        segment: &FrameLineSegment2,
        first: &mut FramePoint2,
        second: &mut FramePoint2,
    ) -> Result<usize> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(segment)?;
        let dir = segment.second() - segment.first();
        let hit = self.clip_query(segment.first(), &dir, 0.0, 1.0);
        Ok(self.pack_pair(hit, first, second))
    }

    /// Orthogonal projection onto the polygon: the closest boundary point
    /// when `point` is outside, `point` itself when inside or on the
    /// boundary, `None` for an empty polygon. Strict.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn orthogonal_projection(&self, point: &FramePoint2) -> Result<Option<FramePoint2>> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(point)?;
        Ok(
            polygon_2d::orthogonal_projection_convex_cw(point.point(), &self.vertices)
                .map(|p| FramePoint2::from_point(self.frame(), p)),
        )
    }

    /// Pack-style [`orthogonal_projection`](Self::orthogonal_projection):
    /// writes into `out`, relabelling its frame to the polygon's, and
    /// returns whether a projection exists. Garbage-free.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `point` is in a different frame.
    pub fn orthogonal_projection_in(
        &self,
        point: &FramePoint2,
        out: &mut FramePoint2,
    ) -> Result<bool> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(point)?;
        match polygon_2d::orthogonal_projection_convex_cw(point.point(), &self.vertices) {
            Some(p) => {
                out.pack(self.frame(), p);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clips `origin + t * dir` over `[t_min, t_max]` against the hull and
    /// keeps only genuine boundary crossings: an interval end produced by
    /// the query's own `t` bounds inside the polygon (a ray origin or
    /// segment endpoint strictly inside) is not an intersection point.
    /// Near-coincident entry/exit collapses into a single point.
    fn clip_query(
        &self,
        origin: &Point2,
        dir: &Vector2,
        t_min: f64,
        t_max: f64,
    ) -> Option<(Point2, Option<Point2>)> {
        let (lo, hi) = clip_to_convex_cw(origin, dir, t_min, t_max, &self.vertices)?;
        let on_boundary = |p: &Point2| {
            polygon_2d::signed_distance_convex_cw(p, &self.vertices).abs() <= 1e-9
        };
        let first = origin + dir * lo;
        let second = origin + dir * hi;
        let distinct = (hi - lo) * dir.norm() >= TOLERANCE;
        match (
            on_boundary(&first),
            distinct && on_boundary(&second),
        ) {
            (true, true) => Some((first, Some(second))),
            (true, false) => Some((first, None)),
            (false, true) => Some((second, None)),
            (false, false) => None,
        }
    }

    fn lift_pair(&self, a: Point2, b: Option<Point2>) -> (FramePoint2, Option<FramePoint2>) {
        (
            FramePoint2::from_point(self.frame(), a),
            b.map(|p| FramePoint2::from_point(self.frame(), p)),
        )
    }

    fn pack_pair(
        &self,
        hit: Option<(Point2, Option<Point2>)>,
        first: &mut FramePoint2,
        second: &mut FramePoint2,
    ) -> usize {
        match hit {
            None => 0,
            Some((a, None)) => {
                first.pack(self.frame(), a);
                1
            }
            Some((a, Some(b))) => {
                first.pack(self.frame(), a);
                second.pack(self.frame(), b);
                2
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{PolyframeError, PolygonError};
    use crate::frame::ReferenceFrame;
    use crate::geometry::FrameVector2;

    fn world() -> ReferenceFrame {
        ReferenceFrame::root("world")
    }

    fn unit_square(frame: &ReferenceFrame) -> FrameConvexPolygon2 {
        let mut polygon = FrameConvexPolygon2::new(frame);
        polygon.add_vertex_xy(0.0, 0.0);
        polygon.add_vertex_xy(1.0, 0.0);
        polygon.add_vertex_xy(1.0, 1.0);
        polygon.add_vertex_xy(0.0, 1.0);
        polygon.update();
        polygon
    }

    // ── lifecycle ──

    #[test]
    fn queries_fail_fast_while_stale() {
        let w = world();
        let mut polygon = unit_square(&w);
        polygon.add_vertex_xy(2.0, 2.0); // stale again
        let p = FramePoint2::new(&w, 0.5, 0.5);

        let err = polygon.is_point_inside(&p).unwrap_err();
        assert!(matches!(
            err,
            PolyframeError::Polygon(PolygonError::OutOfDate)
        ));
        assert!(polygon.signed_distance(&p).is_err());
        assert!(polygon.centroid().is_err());
        assert!(polygon.area().is_err());
        assert!(polygon.vertex(0).is_err());
        assert!(polygon.closest_vertex(&p).is_err());
        assert!(polygon.orthogonal_projection(&p).is_err());
        assert!(polygon.line_of_sight_indices(&p).is_err());
    }

    #[test]
    fn strict_queries_reject_foreign_frames() {
        let w = world();
        let other = ReferenceFrame::root("other");
        let polygon = unit_square(&w);
        let foreign = FramePoint2::new(&other, 0.5, 0.5);

        assert!(polygon.is_point_inside(&foreign).is_err());
        assert!(polygon.signed_distance(&foreign).is_err());
        assert!(polygon.closest_vertex(&foreign).is_err());
        assert!(polygon.orthogonal_projection(&foreign).is_err());
    }

    // ── end-to-end scenarios ──

    #[test]
    fn square_with_interior_point_scenario() {
        let w = world();
        let mut polygon = FrameConvexPolygon2::new(&w);
        polygon.add_vertex_xy(0.0, 0.0);
        polygon.add_vertex_xy(2.0, 0.0);
        polygon.add_vertex_xy(2.0, 2.0);
        polygon.add_vertex_xy(0.0, 2.0);
        polygon.add_vertex_xy(1.0, 1.0); // interior point
        polygon.update();

        assert_eq!(polygon.number_of_vertices(), 4);
        let center = FramePoint2::new(&w, 1.0, 1.0);
        for i in 0..4 {
            let v = polygon.vertex(i).unwrap().unwrap();
            assert!((v.x() - 1.0).abs() > 0.5, "interior point kept: {v:?}");
        }
        assert!(polygon.is_point_inside(&center).unwrap());
        assert!(polygon.signed_distance(&center).unwrap() < 0.0);
    }

    #[test]
    fn degenerate_segment_polygon_scenario() {
        let w = world();
        let mut polygon = FrameConvexPolygon2::new(&w);
        polygon.add_vertex_xy(0.0, 0.0);
        polygon.add_vertex_xy(1.0, 0.0);
        polygon.update();

        assert!(polygon
            .is_point_inside(&FramePoint2::new(&w, 0.5, 0.0))
            .unwrap());
        assert!(!polygon
            .is_point_inside(&FramePoint2::new(&w, 0.5, 1.0))
            .unwrap());
        let d = polygon.distance(&FramePoint2::new(&w, 0.5, 1.0)).unwrap();
        assert!((d - 1.0).abs() < TOLERANCE, "d={d}");
    }

    #[test]
    fn line_of_sight_scenario() {
        let w = world();
        let polygon = unit_square(&w);
        let observer = FramePoint2::new(&w, 5.0, 0.0);

        // Clockwise order from the canonical start:
        // 0:(0,0) 1:(0,1) 2:(1,1) 3:(1,0).
        // The observer sees the right edge; the bottom edge lies on the
        // observer's line and is not strictly visible.
        let (start, end) = polygon.line_of_sight_indices(&observer).unwrap().unwrap();
        assert_eq!((start, end), (2, 3));

        let (first, last) = polygon.line_of_sight_vertices(&observer).unwrap().unwrap();
        assert!((first.x() - 1.0).abs() < TOLERANCE && (first.y() - 1.0).abs() < TOLERANCE);
        assert!((last.x() - 1.0).abs() < TOLERANCE && last.y().abs() < TOLERANCE);

        // An observer clear of all edge lines sees two edges, and the range
        // wraps past the canonical start.
        let low = FramePoint2::new(&w, 5.0, -1.0);
        let (s, e) = polygon.line_of_sight_indices(&low).unwrap().unwrap();
        assert_eq!((s, e), (2, 0));
    }

    #[test]
    fn query_after_mutation_scenario() {
        let w = world();
        let mut polygon = unit_square(&w);
        polygon.add_vertex_xy(3.0, 3.0);
        let err = polygon
            .is_point_inside(&FramePoint2::new(&w, 0.5, 0.5))
            .unwrap_err();
        assert!(matches!(
            err,
            PolyframeError::Polygon(PolygonError::OutOfDate)
        ));
    }

    // ── containment and distance ──

    #[test]
    fn every_vertex_is_inside() {
        let w = world();
        let mut polygon = FrameConvexPolygon2::new(&w);
        polygon.add_vertex_xy(0.0, 0.0);
        polygon.add_vertex_xy(4.0, -1.0);
        polygon.add_vertex_xy(5.0, 3.0);
        polygon.add_vertex_xy(1.0, 4.0);
        polygon.update();

        for i in 0..polygon.number_of_vertices() {
            let v = polygon.vertex(i).unwrap().unwrap();
            assert!(polygon.is_point_inside(&v).unwrap(), "vertex {i} outside");
        }
    }

    #[test]
    fn epsilon_containment() {
        let w = world();
        let polygon = unit_square(&w);
        let near = FramePoint2::new(&w, 1.0 + 1e-4, 0.5);
        assert!(!polygon.is_point_inside(&near).unwrap());
        assert!(polygon.is_point_inside_eps(&near, 1e-3).unwrap());
        let inside = FramePoint2::new(&w, 1.0 - 1e-4, 0.5);
        assert!(!polygon.is_point_inside_eps(&inside, -1e-3).unwrap());
    }

    #[test]
    fn signed_distance_signs() {
        let w = world();
        let polygon = unit_square(&w);
        assert!(polygon.signed_distance(&FramePoint2::new(&w, 0.5, 0.5)).unwrap() < 0.0);
        let outside = polygon.signed_distance(&FramePoint2::new(&w, 2.0, 0.5)).unwrap();
        assert!((outside - 1.0).abs() < TOLERANCE);
        let boundary = polygon.signed_distance(&FramePoint2::new(&w, 1.0, 0.5)).unwrap();
        assert!(boundary.abs() < TOLERANCE);
    }

    #[test]
    fn empty_polygon_degenerates() {
        let w = world();
        let mut polygon = FrameConvexPolygon2::new(&w);
        polygon.update();

        let p = FramePoint2::new(&w, 1.0, 1.0);
        assert!(!polygon.is_point_inside(&p).unwrap());
        assert!(polygon.signed_distance(&p).unwrap().is_infinite());
        assert!(polygon.centroid().unwrap().is_none());
        assert!(polygon.closest_vertex(&p).unwrap().is_none());
        assert!(polygon.closest_edge(&p).unwrap().is_none());
        assert!(polygon.orthogonal_projection(&p).unwrap().is_none());
        assert!(polygon.area().unwrap().abs() < TOLERANCE);

        let mut out = FramePoint2::origin(&w);
        assert!(!polygon.centroid_in(&mut out).unwrap());
        assert!(!polygon.orthogonal_projection_in(&p, &mut out).unwrap());
    }

    // ── closest features ──

    #[test]
    fn closest_vertex_and_edge() {
        let w = world();
        let polygon = unit_square(&w);
        let p = FramePoint2::new(&w, 2.0, 0.9);

        let v = polygon.closest_vertex(&p).unwrap().unwrap();
        assert!((v.x() - 1.0).abs() < TOLERANCE && (v.y() - 1.0).abs() < TOLERANCE);

        // Nearest edge is the right side (1,1) → (1,0).
        let e = polygon.closest_edge(&p).unwrap().unwrap();
        assert!((e.first().x - 1.0).abs() < TOLERANCE);
        assert!((e.second().x - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn closest_vertex_to_line_scan() {
        let w = world();
        let polygon = unit_square(&w);
        // Vertical line x = 3: both right-side vertices tie; lowest index
        // wins, which is (1,1) at index 2.
        let line = FrameLine2::new(&w, Point2::new(3.0, 0.0), Vector2::new(0.0, 1.0)).unwrap();
        let v = polygon.closest_vertex_to_line(&line).unwrap().unwrap();
        assert!((v.x() - 1.0).abs() < TOLERANCE && (v.y() - 1.0).abs() < TOLERANCE);
    }

    // ── intersections ──

    #[test]
    fn line_intersection_two_points() {
        let w = world();
        let polygon = unit_square(&w);
        let line = FrameLine2::new(&w, Point2::new(-1.0, 0.5), Vector2::new(1.0, 0.0)).unwrap();
        let (a, b) = polygon.intersection_with_line(&line).unwrap().unwrap();
        let b = b.unwrap();
        assert!(a.x().abs() < TOLERANCE && (a.y() - 0.5).abs() < TOLERANCE);
        assert!((b.x() - 1.0).abs() < TOLERANCE && (b.y() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn line_intersection_miss_and_tangent() {
        let w = world();
        let polygon = unit_square(&w);
        let miss = FrameLine2::new(&w, Point2::new(-1.0, 2.0), Vector2::new(1.0, 0.0)).unwrap();
        assert!(polygon.intersection_with_line(&miss).unwrap().is_none());

        // Diagonal through the corner (0,1) only.
        let tangent = FrameLine2::new(&w, Point2::new(-1.0, 0.0), Vector2::new(1.0, 1.0)).unwrap();
        let (a, b) = polygon.intersection_with_line(&tangent).unwrap().unwrap();
        assert!(b.is_none(), "expected a single tangency point");
        assert!(a.x().abs() < 1e-9 && (a.y() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn line_collinear_with_edge_hits_endpoints() {
        let w = world();
        let polygon = unit_square(&w);
        let along_bottom =
            FrameLine2::new(&w, Point2::new(-2.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
        let (a, b) = polygon.intersection_with_line(&along_bottom).unwrap().unwrap();
        let b = b.unwrap();
        assert!(a.x().abs() < TOLERANCE && a.y().abs() < TOLERANCE);
        assert!((b.x() - 1.0).abs() < TOLERANCE && b.y().abs() < TOLERANCE);
    }

    #[test]
    fn ray_intersections() {
        let w = world();
        let polygon = unit_square(&w);

        // From inside: only the exit is a boundary crossing.
        let from_inside =
            FrameLine2::new(&w, Point2::new(0.5, 0.5), Vector2::new(1.0, 0.0)).unwrap();
        let (a, b) = polygon.intersection_with_ray(&from_inside).unwrap().unwrap();
        assert!(b.is_none(), "ray origin is not an intersection point");
        assert!((a.x() - 1.0).abs() < TOLERANCE);
        assert!((a.y() - 0.5).abs() < TOLERANCE);

        // Pointing away: no intersection.
        let away = FrameLine2::new(&w, Point2::new(2.0, 0.5), Vector2::new(1.0, 0.0)).unwrap();
        assert!(polygon.intersection_with_ray(&away).unwrap().is_none());
    }

    #[test]
    fn segment_intersections() {
        let w = world();
        let polygon = unit_square(&w);

        // Fully crossing segment.
        let crossing =
            FrameLineSegment2::new(&w, Point2::new(-1.0, 0.5), Point2::new(2.0, 0.5));
        let (a, b) = polygon.intersection_with_segment(&crossing).unwrap().unwrap();
        assert!(a.x().abs() < TOLERANCE);
        assert!((b.unwrap().x() - 1.0).abs() < TOLERANCE);

        // Segment ending inside: only the entry crosses the boundary.
        let ending_inside =
            FrameLineSegment2::new(&w, Point2::new(-1.0, 0.5), Point2::new(0.5, 0.5));
        let (a, b) = polygon
            .intersection_with_segment(&ending_inside)
            .unwrap()
            .unwrap();
        assert!(b.is_none(), "interior segment endpoint is not an intersection");
        assert!(a.x().abs() < TOLERANCE);

        // Fully interior segment never touches the boundary.
        let interior = FrameLineSegment2::new(&w, Point2::new(0.2, 0.5), Point2::new(0.8, 0.5));
        assert!(polygon.intersection_with_segment(&interior).unwrap().is_none());

        // Disjoint segment.
        let outside = FrameLineSegment2::new(&w, Point2::new(2.0, 2.0), Point2::new(3.0, 2.0));
        assert!(polygon.intersection_with_segment(&outside).unwrap().is_none());
    }

    #[test]
    fn pack_intersections_relabel_output_frames() {
        let w = world();
        let scratch_frame = ReferenceFrame::root("scratch");
        let polygon = unit_square(&w);
        let line = FrameLine2::new(&w, Point2::new(-1.0, 0.5), Vector2::new(1.0, 0.0)).unwrap();

        // Freshly constructed containers in an unrelated frame.
        let mut first = FramePoint2::origin(&scratch_frame);
        let mut second = FramePoint2::origin(&scratch_frame);
        let count = polygon
            .intersection_with_line_in(&line, &mut first, &mut second)
            .unwrap();
        assert_eq!(count, 2);
        assert!(first.is_same_frame_as(&polygon));
        assert!(second.is_same_frame_as(&polygon));
        assert!((second.x() - 1.0).abs() < TOLERANCE);

        // A miss leaves the outputs untouched.
        let miss = FrameLine2::new(&w, Point2::new(-1.0, 5.0), Vector2::new(1.0, 0.0)).unwrap();
        let mut untouched = FramePoint2::new(&scratch_frame, 9.0, 9.0);
        let mut other = FramePoint2::new(&scratch_frame, 9.0, 9.0);
        let count = polygon
            .intersection_with_ray_in(&miss, &mut untouched, &mut other)
            .unwrap();
        assert_eq!(count, 0);
        assert!((untouched.x() - 9.0).abs() < TOLERANCE);
        assert!(untouched.is_same_frame_as(&FramePoint2::origin(&scratch_frame)));
    }

    // ── projection ──

    #[test]
    fn projection_identity_inside_boundary_outside() {
        let w = world();
        let polygon = unit_square(&w);

        let inside = FramePoint2::new(&w, 0.25, 0.75);
        let p = polygon.orthogonal_projection(&inside).unwrap().unwrap();
        assert!(p.epsilon_equals(&inside, 1e-12), "interior projection must be the identity");

        let outside = FramePoint2::new(&w, 2.0, 0.5);
        let q = polygon.orthogonal_projection(&outside).unwrap().unwrap();
        assert!((q.x() - 1.0).abs() < TOLERANCE && (q.y() - 0.5).abs() < TOLERANCE);

        let mut out = FramePoint2::origin(&ReferenceFrame::root("scratch"));
        assert!(polygon.orthogonal_projection_in(&outside, &mut out).unwrap());
        assert!(out.is_same_frame_as(&polygon));
        assert!((out.x() - 1.0).abs() < TOLERANCE);
    }

    // ── matching-frame workflow ──

    #[test]
    fn matching_frame_succeeds_where_strict_fails() {
        let w = world();
        let sensor = w.child(
            "sensor",
            crate::math::Isometry2::new(Vector2::new(1.0, 0.0), 0.0),
        );
        let mut polygon = FrameConvexPolygon2::new(&w);
        let measured = [
            FramePoint2::new(&sensor, 0.0, 0.0),
            FramePoint2::new(&sensor, 1.0, 0.0),
            FramePoint2::new(&sensor, 0.5, 1.0),
        ];

        assert!(polygon.add_vertices(&measured).is_err());

        polygon.set_from_points_matching_frame(&measured);
        assert!(polygon.is_up_to_date());
        // Sensor origin sits at (1, 0) in world.
        let inside_world = FramePoint2::new(&w, 1.5, 0.3);
        assert!(polygon.is_point_inside(&inside_world).unwrap());

        // Translation expressed in the wrong frame still fails strictly.
        assert!(polygon
            .translate(&FrameVector2::new(&sensor, 1.0, 0.0))
            .is_err());
    }
}
