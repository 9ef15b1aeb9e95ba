mod query;

use crate::error::{PolygonError, Result};
use crate::frame::{InFrame, ReferenceFrame};
use crate::math::{hull_2d, polygon_2d, Point2};

use super::{FramePoint2, FrameVector2};

/// A mutable convex polygon whose vertices are all expressed in one fixed
/// reference frame.
///
/// The polygon moves through a two-phase lifecycle. Mutators (`clear`,
/// `add_vertex*`, `set_from*`) write raw, possibly non-convex, possibly
/// duplicated points into the vertex buffer and mark the polygon out of
/// date. [`update`](Self::update) computes the convex hull over the buffered
/// points, reorders them clockwise, drops redundant ones, and recomputes the
/// centroid and area; only then do queries answer. Every query fails fast
/// with [`PolygonError::OutOfDate`] while the polygon is stale.
///
/// The vertex buffer is owned exclusively by the polygon and reused across
/// cycles: it only ever grows, so steady-state mutation and `update` are
/// allocation-free. Operations returning `*_copy` values are the documented
/// allocation points. Instances are single-writer; callers serialize access.
#[derive(Debug, Clone)]
pub struct FrameConvexPolygon2 {
    frame: ReferenceFrame,
    vertices: Vec<Point2>,
    scratch: Vec<Point2>,
    centroid: Option<Point2>,
    area: f64,
    up_to_date: bool,
}

impl FrameConvexPolygon2 {
    /// Creates an empty, out-of-date polygon in `frame`.
    #[must_use]
    pub fn new(frame: &ReferenceFrame) -> Self {
        Self {
            frame: frame.clone(),
            vertices: Vec::new(),
            scratch: Vec::new(),
            centroid: None,
            area: 0.0,
            up_to_date: false,
        }
    }

    /// Builds an up-to-date polygon from `points`. Strict on every point.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if any point is in a different frame.
    pub fn from_points(frame: &ReferenceFrame, points: &[FramePoint2]) -> Result<Self> {
        let mut polygon = Self::new(frame);
        polygon.set_from_points(points)?;
        Ok(polygon)
    }

    /// Number of active vertices (hull vertices once up to date).
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn is_up_to_date(&self) -> bool {
        self.up_to_date
    }

    pub(crate) fn ensure_up_to_date(&self) -> std::result::Result<(), PolygonError> {
        if self.up_to_date {
            Ok(())
        } else {
            Err(PolygonError::OutOfDate)
        }
    }

    // ── mutation ──

    /// Empties the vertex buffer and marks the polygon out of date. The
    /// frame is unchanged.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.centroid = None;
        self.area = 0.0;
        self.up_to_date = false;
    }

    /// Empties the vertex buffer and redirects the polygon to `frame`
    /// (movable-frame reset, for reusing one instance across producers).
    pub fn clear_in_frame(&mut self, frame: &ReferenceFrame) {
        self.clear();
        self.frame = frame.clone();
    }

    /// Appends a raw vertex, trusted to already be expressed in the
    /// polygon's frame. Marks the polygon out of date.
    pub fn add_vertex_xy(&mut self, x: f64, y: f64) {
        self.vertices.push(Point2::new(x, y));
        self.up_to_date = false;
    }

    /// Appends a raw vertex declared to be expressed in `frame`. Strict:
    /// the buffer is untouched unless `frame` is the polygon's frame.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `frame` is a different frame.
    pub fn add_vertex_in_frame(&mut self, frame: &ReferenceFrame, x: f64, y: f64) -> Result<()> {
        self.ensure_same_frame_as(frame)?;
        self.vertices.push(Point2::new(x, y));
        self.up_to_date = false;
        Ok(())
    }

    /// Appends a vertex. Strict: the buffer is untouched on mismatch.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `point` is in a different frame.
    pub fn add_vertex(&mut self, point: &FramePoint2) -> Result<()> {
        self.ensure_same_frame_as(point)?;
        self.vertices.push(*point.point());
        self.up_to_date = false;
        Ok(())
    }

    /// Appends a vertex after transforming it into the polygon's frame.
    pub fn add_vertex_matching_frame(&mut self, point: &FramePoint2) {
        let tf = point.frame().transform_to(&self.frame);
        self.vertices.push(tf * point.point());
        self.up_to_date = false;
    }

    /// Appends all `points` in order. Strict on every point; all frames are
    /// checked before the first append, so a mismatch leaves the buffer
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if any point is in a different frame.
    pub fn add_vertices(&mut self, points: &[FramePoint2]) -> Result<()> {
        for point in points {
            self.ensure_same_frame_as(point)?;
        }
        for point in points {
            self.vertices.push(*point.point());
        }
        self.up_to_date = false;
        Ok(())
    }

    /// Appends all `points` in order, transforming each into the polygon's
    /// frame.
    pub fn add_vertices_matching_frame(&mut self, points: &[FramePoint2]) {
        for point in points {
            self.add_vertex_matching_frame(point);
        }
    }

    /// Appends the active vertices of `other`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn add_polygon(&mut self, other: &FrameConvexPolygon2) -> Result<()> {
        self.ensure_same_frame_as(other)?;
        self.vertices.extend_from_slice(&other.vertices);
        self.up_to_date = false;
        Ok(())
    }

    /// Appends the active vertices of `other`, transformed into the
    /// polygon's frame.
    pub fn add_polygon_matching_frame(&mut self, other: &FrameConvexPolygon2) {
        let tf = other.frame.transform_to(&self.frame);
        for v in &other.vertices {
            self.vertices.push(tf * v);
        }
        self.up_to_date = false;
    }

    /// `clear` + `add_vertices` + `update` in one step. Strict; the polygon
    /// is unchanged on mismatch.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if any point is in a different frame.
    pub fn set_from_points(&mut self, points: &[FramePoint2]) -> Result<()> {
        for point in points {
            self.ensure_same_frame_as(point)?;
        }
        self.clear();
        for point in points {
            self.vertices.push(*point.point());
        }
        self.update();
        Ok(())
    }

    /// `clear` + `add_vertices_matching_frame` + `update` in one step.
    pub fn set_from_points_matching_frame(&mut self, points: &[FramePoint2]) {
        self.clear();
        self.add_vertices_matching_frame(points);
        self.update();
    }

    /// `clear` + `add_polygon` + `update` in one step. Strict; the polygon
    /// is unchanged on mismatch.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn set_from_polygon(&mut self, other: &FrameConvexPolygon2) -> Result<()> {
        self.ensure_same_frame_as(other)?;
        self.clear();
        self.vertices.extend_from_slice(&other.vertices);
        self.update();
        Ok(())
    }

    /// `clear` + `add_polygon_matching_frame` + `update` in one step.
    pub fn set_from_polygon_matching_frame(&mut self, other: &FrameConvexPolygon2) {
        self.clear();
        self.add_polygon_matching_frame(other);
        self.update();
    }

    /// Sets this polygon to the convex hull of the union of two polygons.
    /// Strict on both; the polygon is unchanged on mismatch.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if either polygon is in a different
    /// frame.
    pub fn set_from_polygons(
        &mut self,
        first: &FrameConvexPolygon2,
        second: &FrameConvexPolygon2,
    ) -> Result<()> {
        self.ensure_same_frame_as(first)?;
        self.ensure_same_frame_as(second)?;
        self.clear();
        self.vertices.extend_from_slice(&first.vertices);
        self.vertices.extend_from_slice(&second.vertices);
        self.update();
        Ok(())
    }

    /// Recomputes the convex hull over the buffered points and the derived
    /// centroid and area, then marks the polygon queryable.
    ///
    /// The hull is the unique minimal clockwise vertex set: interior and
    /// collinear-redundant points are dropped (extreme occurrences of a
    /// collinear run survive; the first-buffered of exactly coincident
    /// points survives), and the listing starts at the lexicographically
    /// smallest vertex. Zero, one, or two buffered points degenerate to an
    /// empty, point, or segment polygon without error. Idempotent.
    pub fn update(&mut self) {
        self.scratch.clear();
        self.scratch.extend_from_slice(&self.vertices);
        hull_2d::convex_hull_clockwise_into(&mut self.scratch, &mut self.vertices);
        self.centroid = polygon_2d::centroid_2d(&self.vertices);
        self.area = polygon_2d::signed_area_2d(&self.vertices).abs();
        self.up_to_date = true;
    }

    // ── post-update affine mutators ──

    /// Translates every vertex and the centroid in place. Strict; requires
    /// the polygon to be up to date and leaves it up to date (a rigid
    /// translation preserves the hull). Garbage-free.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `translation` is in a different frame.
    pub fn translate(&mut self, translation: &FrameVector2) -> Result<()> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(translation)?;
        let t = *translation.vector();
        for v in &mut self.vertices {
            *v += t;
        }
        if let Some(c) = &mut self.centroid {
            *c += t;
        }
        Ok(())
    }

    /// Returns a translated copy. Strict; allocates the copy.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `translation` is in a different frame.
    pub fn translated_copy(&self, translation: &FrameVector2) -> Result<FrameConvexPolygon2> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(translation)?;
        let mut copy = self.clone();
        copy.translate(translation)?;
        Ok(copy)
    }

    /// Scales every vertex and the centroid about `pivot` in place. Strict;
    /// requires the polygon to be up to date and leaves it up to date.
    /// `factor` is expected positive: winding order is preserved only then.
    /// Garbage-free.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale, or
    /// `FrameError::Mismatch` if `pivot` is in a different frame.
    pub fn scale_about(&mut self, pivot: &FramePoint2, factor: f64) -> Result<()> {
        self.ensure_up_to_date()?;
        self.ensure_same_frame_as(pivot)?;
        let p = *pivot.point();
        for v in &mut self.vertices {
            *v = p + (*v - p) * factor;
        }
        if let Some(c) = &mut self.centroid {
            *c = p + (*c - p) * factor;
        }
        self.area *= factor * factor;
        Ok(())
    }

    /// Scales about the centroid. No-op for an empty polygon.
    ///
    /// # Errors
    ///
    /// Returns `PolygonError::OutOfDate` when stale.
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        self.ensure_up_to_date()?;
        let Some(c) = self.centroid else {
            return Ok(());
        };
        let pivot = FramePoint2::from_point(&self.frame, c);
        self.scale_about(&pivot, factor)
    }

    /// Re-expresses every buffered vertex (and the centroid, if valid) in
    /// `target` and redirects the frame tag. Usable in both lifecycle
    /// phases; an up-to-date polygon stays up to date (isometries preserve
    /// the hull).
    pub fn change_frame(&mut self, target: &ReferenceFrame) {
        let tf = self.frame.transform_to(target);
        for v in &mut self.vertices {
            *v = tf * *v;
        }
        if let Some(c) = &mut self.centroid {
            *c = tf * *c;
        }
        self.frame = target.clone();
    }

    // ── equality ──

    /// Per-vertex tolerance comparison: same frame, same vertex count, same
    /// order, every coordinate within `epsilon`.
    #[must_use]
    pub fn epsilon_equals(&self, other: &FrameConvexPolygon2, epsilon: f64) -> bool {
        if !self.is_same_frame_as(other) || self.vertices.len() != other.vertices.len() {
            return false;
        }
        self.vertices
            .iter()
            .zip(&other.vertices)
            .all(|(a, b)| (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon)
    }

    /// Shape comparison: same frame and the same vertex ring up to a cyclic
    /// shift of the start index and either winding direction.
    #[must_use]
    pub fn geometrically_equals(&self, other: &FrameConvexPolygon2, epsilon: f64) -> bool {
        if !self.is_same_frame_as(other) {
            return false;
        }
        let a = &self.vertices;
        let b = &other.vertices;
        let n = a.len();
        if n != b.len() {
            return false;
        }
        if n == 0 {
            return true;
        }
        for shift in 0..n {
            let forward = (0..n).all(|i| (a[i] - b[(i + shift) % n]).norm() <= epsilon);
            if forward {
                return true;
            }
            let reversed = (0..n).all(|i| (a[i] - b[(shift + n - i) % n]).norm() <= epsilon);
            if reversed {
                return true;
            }
        }
        false
    }
}

impl InFrame for FrameConvexPolygon2 {
    fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }
}

/// Exact per-vertex equality in the identical frame and lifecycle phase.
impl PartialEq for FrameConvexPolygon2 {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_frame_as(other)
            && self.up_to_date == other.up_to_date
            && self.vertices == other.vertices
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Isometry2, Vector2, TOLERANCE};

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

    #[test]
    fn starts_empty_and_stale() {
        let polygon = FrameConvexPolygon2::new(&world());
        assert!(polygon.is_empty());
        assert!(!polygon.is_up_to_date());
    }

    #[test]
    fn update_builds_hull_and_drops_interior_point() {
        let w = world();
        let mut polygon = FrameConvexPolygon2::new(&w);
        polygon.add_vertex_xy(0.0, 0.0);
        polygon.add_vertex_xy(2.0, 0.0);
        polygon.add_vertex_xy(2.0, 2.0);
        polygon.add_vertex_xy(0.0, 2.0);
        polygon.add_vertex_xy(1.0, 1.0); // interior
        polygon.update();

        assert!(polygon.is_up_to_date());
        assert_eq!(polygon.number_of_vertices(), 4);
        assert!((polygon.area().unwrap() - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn mutation_invalidates() {
        let w = world();
        let mut polygon = unit_square(&w);
        assert!(polygon.is_up_to_date());
        polygon.add_vertex_xy(5.0, 5.0);
        assert!(!polygon.is_up_to_date());
        polygon.update();
        assert!(polygon.is_up_to_date());
        polygon.clear();
        assert!(!polygon.is_up_to_date());
        assert!(polygon.is_empty());
    }

    #[test]
    fn update_is_idempotent() {
        let w = world();
        let mut polygon = FrameConvexPolygon2::new(&w);
        polygon.add_vertex_xy(0.0, 0.0);
        polygon.add_vertex_xy(3.0, 1.0);
        polygon.add_vertex_xy(2.0, 4.0);
        polygon.add_vertex_xy(1.0, 1.0);
        polygon.update();
        let first = polygon.clone();
        polygon.update();
        assert_eq!(polygon, first);
    }

    #[test]
    fn add_vertex_strict_and_matching() {
        let w = world();
        let shifted = w.child("shifted", Isometry2::new(Vector2::new(1.0, 0.0), 0.0));
        let mut polygon = FrameConvexPolygon2::new(&w);

        let foreign = FramePoint2::new(&shifted, 0.0, 0.0);
        assert!(polygon.add_vertex(&foreign).is_err());
        assert!(polygon.is_empty(), "buffer mutated on failure");

        polygon.add_vertex_matching_frame(&foreign);
        polygon.update();
        assert_eq!(polygon.number_of_vertices(), 1);
        let v = polygon.vertex(0).unwrap().unwrap();
        assert!((v.x() - 1.0).abs() < TOLERANCE, "x={}", v.x());
    }

    #[test]
    fn add_vertex_in_frame_checks_declared_frame() {
        let w = world();
        let other = ReferenceFrame::root("other");
        let mut polygon = FrameConvexPolygon2::new(&w);
        assert!(polygon.add_vertex_in_frame(&other, 1.0, 1.0).is_err());
        assert!(polygon.is_empty(), "buffer mutated on failure");
        polygon.add_vertex_in_frame(&w, 1.0, 1.0).unwrap();
        assert_eq!(polygon.number_of_vertices(), 1);
    }

    #[test]
    fn add_vertices_checks_all_frames_before_appending() {
        let w = world();
        let other = ReferenceFrame::root("other");
        let mut polygon = FrameConvexPolygon2::new(&w);
        let points = vec![
            FramePoint2::new(&w, 0.0, 0.0),
            FramePoint2::new(&other, 1.0, 0.0),
        ];
        assert!(polygon.add_vertices(&points).is_err());
        assert!(polygon.is_empty(), "partial mutation observed");
    }

    #[test]
    fn set_from_points_composite() {
        let w = world();
        let points = vec![
            FramePoint2::new(&w, 0.0, 0.0),
            FramePoint2::new(&w, 1.0, 0.0),
            FramePoint2::new(&w, 0.5, 2.0),
        ];
        let polygon = FrameConvexPolygon2::from_points(&w, &points).unwrap();
        assert!(polygon.is_up_to_date());
        assert_eq!(polygon.number_of_vertices(), 3);
    }

    #[test]
    fn set_from_polygons_hulls_the_union() {
        let w = world();
        let a = unit_square(&w);
        let mut b = FrameConvexPolygon2::new(&w);
        b.add_vertex_xy(2.0, 0.0);
        b.add_vertex_xy(3.0, 0.0);
        b.add_vertex_xy(3.0, 1.0);
        b.add_vertex_xy(2.0, 1.0);
        b.update();

        let mut union = FrameConvexPolygon2::new(&w);
        union.set_from_polygons(&a, &b).unwrap();
        // The union hull is the 3x1 rectangle; the four inner corners drop.
        assert_eq!(union.number_of_vertices(), 4);
        assert!((union.area().unwrap() - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn clear_in_frame_redirects() {
        let w = world();
        let other = ReferenceFrame::root("other");
        let mut polygon = unit_square(&w);
        polygon.clear_in_frame(&other);
        assert!(polygon.is_empty());
        assert!(polygon.frame().is_same_frame(&other));
    }

    #[test]
    fn translate_moves_vertices_and_centroid() {
        let w = world();
        let mut polygon = unit_square(&w);
        polygon.translate(&FrameVector2::new(&w, 2.0, 1.0)).unwrap();
        assert!(polygon.is_up_to_date());
        let c = polygon.centroid().unwrap().unwrap();
        assert!((c.x() - 2.5).abs() < TOLERANCE);
        assert!((c.y() - 1.5).abs() < TOLERANCE);
        assert!((polygon.area().unwrap() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn translate_requires_up_to_date_and_same_frame() {
        let w = world();
        let other = ReferenceFrame::root("other");
        let mut polygon = unit_square(&w);
        assert!(polygon.translate(&FrameVector2::new(&other, 1.0, 0.0)).is_err());

        polygon.add_vertex_xy(0.5, 0.5);
        assert!(polygon.translate(&FrameVector2::new(&w, 1.0, 0.0)).is_err());
    }

    #[test]
    fn scale_about_centroid() {
        let w = world();
        let mut polygon = unit_square(&w);
        polygon.scale(2.0).unwrap();
        let c = polygon.centroid().unwrap().unwrap();
        assert!((c.x() - 0.5).abs() < TOLERANCE);
        assert!((c.y() - 0.5).abs() < TOLERANCE);
        assert!((polygon.area().unwrap() - 4.0).abs() < TOLERANCE);
        assert_eq!(polygon.number_of_vertices(), 4);
    }

    #[test]
    fn scale_about_pivot() {
        let w = world();
        let mut polygon = unit_square(&w);
        let pivot = FramePoint2::new(&w, 0.0, 0.0);
        polygon.scale_about(&pivot, 3.0).unwrap();
        assert!((polygon.area().unwrap() - 9.0).abs() < TOLERANCE);
        // (1,1) corner maps to (3,3).
        let c = polygon.centroid().unwrap().unwrap();
        assert!((c.x() - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn change_frame_round_trip() {
        let w = world();
        let moved = w.child(
            "moved",
            Isometry2::new(Vector2::new(3.0, -1.0), std::f64::consts::FRAC_PI_3),
        );
        let mut polygon = unit_square(&w);
        let original = polygon.clone();
        polygon.change_frame(&moved);
        assert!(polygon.frame().is_same_frame(&moved));
        polygon.change_frame(&w);
        assert!(polygon.epsilon_equals(&original, 1e-12));
    }

    #[test]
    fn epsilon_equals_tolerates_jitter() {
        let w = world();
        let a = unit_square(&w);
        let mut b = a.clone();
        b.translate(&FrameVector2::new(&w, 1e-9, -1e-9)).unwrap();
        assert!(a.epsilon_equals(&b, 1e-8));
        assert!(!a.epsilon_equals(&b, 1e-10));
    }

    #[test]
    fn equality_requires_identical_frame() {
        let w = world();
        let twin = ReferenceFrame::root("world");
        let a = unit_square(&w);
        let b = unit_square(&twin);
        assert_ne!(a, b);
        assert!(!a.epsilon_equals(&b, 1e-6));
        assert!(!a.geometrically_equals(&b, 1e-6));
        assert_eq!(a, unit_square(&w));
    }

    #[test]
    fn geometrically_equals_allows_shift_and_winding() {
        let w = world();
        let a = unit_square(&w);

        // Same ring, shifted start index, same winding.
        let mut b = FrameConvexPolygon2::new(&w);
        b.add_vertex_xy(1.0, 1.0);
        b.add_vertex_xy(1.0, 0.0);
        b.add_vertex_xy(0.0, 0.0);
        b.add_vertex_xy(0.0, 1.0);
        assert!(a.geometrically_equals(&b, 1e-12));

        // Counter-clockwise hand-built listing: reversal plus shift.
        let mut c = FrameConvexPolygon2::new(&w);
        c.add_vertex_xy(0.0, 0.0);
        c.add_vertex_xy(1.0, 0.0);
        c.add_vertex_xy(1.0, 1.0);
        c.add_vertex_xy(0.0, 1.0);
        assert!(a.geometrically_equals(&c, 1e-12));
    }

    #[test]
    fn geometric_round_trip_with_zero_translation() {
        let w = world();
        let a = unit_square(&w);
        let b = a.translated_copy(&FrameVector2::zero(&w)).unwrap();
        assert!(a.geometrically_equals(&b, 1e-12));
    }
}
