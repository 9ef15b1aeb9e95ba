use crate::error::Result;
use crate::frame::{InFrame, ReferenceFrame};
use crate::math::distance_2d::{closest_point_on_segment, point_to_segment_dist};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{Point2, TOLERANCE};

use super::{FramePoint2, FrameVector2};

/// A bounded 2D line segment, tagged with the reference frame it is
/// expressed in.
///
/// Zero-length segments are allowed; operations degenerate per their
/// documentation instead of failing.
#[derive(Debug, Clone)]
pub struct FrameLineSegment2 {
    frame: ReferenceFrame,
    first: Point2,
    second: Point2,
}

impl FrameLineSegment2 {
    /// Creates a segment between two raw endpoints expressed in `frame`.
    #[must_use]
    pub fn new(frame: &ReferenceFrame, first: Point2, second: Point2) -> Self {
        Self {
            frame: frame.clone(),
            first,
            second,
        }
    }

    /// Creates a segment between two frame-tagged endpoints. Strict: both
    /// must share a frame, which becomes the segment's frame.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if the endpoints disagree on frame.
    pub fn from_endpoints(first: &FramePoint2, second: &FramePoint2) -> Result<Self> {
        first.ensure_same_frame_as(second)?;
        Ok(Self::new(first.frame(), *first.point(), *second.point()))
    }

    #[must_use]
    pub fn first(&self) -> &Point2 {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &Point2 {
        &self.second
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.second - self.first).norm()
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        (self.second - self.first).norm_squared()
    }

    /// Returns the midpoint as a new point in the segment's frame.
    #[must_use]
    pub fn midpoint(&self) -> FramePoint2 {
        FramePoint2::new(
            &self.frame,
            (self.first.x + self.second.x) * 0.5,
            (self.first.y + self.second.y) * 0.5,
        )
    }

    /// Packs the midpoint into `out`, relabelling its frame to the
    /// segment's. Garbage-free.
    pub fn midpoint_in(&self, out: &mut FramePoint2) {
        out.pack(
            &self.frame,
            Point2::new(
                (self.first.x + self.second.x) * 0.5,
                (self.first.y + self.second.y) * 0.5,
            ),
        );
    }

    /// Linear interpolation between the endpoints: `t = 0` is the first,
    /// `t = 1` the second. `t` is not clamped.
    #[must_use]
    pub fn point_at(&self, t: f64) -> FramePoint2 {
        FramePoint2::from_point(&self.frame, self.first + (self.second - self.first) * t)
    }

    /// Returns the unit direction from the first to the second endpoint, or
    /// `None` for the degenerate zero-length segment.
    #[must_use]
    pub fn direction(&self) -> Option<FrameVector2> {
        let d = self.second - self.first;
        let len = d.norm();
        if len < TOLERANCE {
            return None;
        }
        Some(FrameVector2::from_vector(&self.frame, d / len))
    }

    /// Re-expresses this segment in `target` and redirects the frame tag.
    pub fn change_frame(&mut self, target: &ReferenceFrame) {
        let tf = self.frame.transform_to(target);
        self.first = tf * self.first;
        self.second = tf * self.second;
        self.frame = target.clone();
    }

    /// Minimum distance from `point` to this segment. Strict. A zero-length
    /// segment degenerates to the point-to-endpoint distance.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `point` is in a different frame.
    pub fn distance_to_point(&self, point: &FramePoint2) -> Result<f64> {
        self.ensure_same_frame_as(point)?;
        Ok(point_to_segment_dist(point.point(), &self.first, &self.second))
    }

    /// Orthogonal projection of `point` onto this segment, clamped to the
    /// endpoints. Strict. The degenerate zero-length segment has no
    /// projection direction and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `point` is in a different frame.
    pub fn orthogonal_projection(&self, point: &FramePoint2) -> Result<Option<FramePoint2>> {
        self.ensure_same_frame_as(point)?;
        if self.length_squared() < TOLERANCE * TOLERANCE {
            return Ok(None);
        }
        Ok(Some(FramePoint2::from_point(
            &self.frame,
            closest_point_on_segment(point.point(), &self.first, &self.second),
        )))
    }

    /// Intersection with another segment. Strict. Parallel (including
    /// collinear overlapping) segments yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn intersection_with(&self, other: &FrameLineSegment2) -> Result<Option<FramePoint2>> {
        self.ensure_same_frame_as(other)?;
        Ok(
            segment_segment_intersect_2d(&self.first, &self.second, &other.first, &other.second)
                .map(|(p, _, _)| FramePoint2::from_point(&self.frame, p)),
        )
    }

    /// Returns `true` when `other` shares this frame and all endpoint
    /// coordinates differ by at most `epsilon`.
    #[must_use]
    pub fn epsilon_equals(&self, other: &FrameLineSegment2, epsilon: f64) -> bool {
        self.is_same_frame_as(other)
            && (self.first.x - other.first.x).abs() <= epsilon
            && (self.first.y - other.first.y).abs() <= epsilon
            && (self.second.x - other.second.x).abs() <= epsilon
            && (self.second.y - other.second.y).abs() <= epsilon
    }
}

impl InFrame for FrameLineSegment2 {
    fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }
}

/// Exact endpoint equality in the identical frame.
impl PartialEq for FrameLineSegment2 {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_frame_as(other) && self.first == other.first && self.second == other.second
    }
}
