use crate::error::{GeometryError, Result};
use crate::frame::{InFrame, ReferenceFrame};
use crate::math::distance_2d::{closest_point_on_line, point_to_line_dist};
use crate::math::{cross_2d, Point2, Vector2, TOLERANCE};

use super::FramePoint2;

/// An infinite 2D line, tagged with the reference frame it is expressed in.
///
/// The parametric form is: `P(t) = origin + t * direction`, with a unit
/// direction vector.
#[derive(Debug, Clone)]
pub struct FrameLine2 {
    frame: ReferenceFrame,
    origin: Point2,
    direction: Vector2,
}

impl FrameLine2 {
    /// Creates a new line from an origin and direction expressed in `frame`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the direction is zero-length.
    pub fn new(frame: &ReferenceFrame, origin: Point2, direction: Vector2) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            frame: frame.clone(),
            origin,
            direction: direction / len,
        })
    }

    /// Creates the line through two points. Strict: both points must share a
    /// frame, which becomes the line's frame.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if the points disagree on frame, or
    /// `GeometryError::ZeroVector` if they coincide.
    pub fn through_points(a: &FramePoint2, b: &FramePoint2) -> Result<Self> {
        a.ensure_same_frame_as(b)?;
        Self::new(a.frame(), *a.point(), b.point() - a.point())
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Evaluates the line at parameter `t`, returning a point in the line's
    /// frame.
    #[must_use]
    pub fn point_at(&self, t: f64) -> FramePoint2 {
        FramePoint2::from_point(&self.frame, self.origin + self.direction * t)
    }

    /// Re-expresses this line in `target` and redirects the frame tag.
    pub fn change_frame(&mut self, target: &ReferenceFrame) {
        let tf = self.frame.transform_to(target);
        self.origin = tf * self.origin;
        self.direction = tf.rotation * self.direction;
        self.frame = target.clone();
    }

    /// Perpendicular distance from `point` to this line. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `point` is in a different frame.
    pub fn distance_to_point(&self, point: &FramePoint2) -> Result<f64> {
        self.ensure_same_frame_as(point)?;
        Ok(point_to_line_dist(point.point(), &self.origin, &self.direction))
    }

    /// Foot of the perpendicular from `point` onto this line. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `point` is in a different frame.
    pub fn orthogonal_projection(&self, point: &FramePoint2) -> Result<FramePoint2> {
        self.ensure_same_frame_as(point)?;
        Ok(FramePoint2::from_point(
            &self.frame,
            closest_point_on_line(point.point(), &self.origin, &self.direction),
        ))
    }

    /// Signed perpendicular offset of `point`: positive on the left of the
    /// direction, negative on the right, zero on the line. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `point` is in a different frame.
    pub fn side_of(&self, point: &FramePoint2) -> Result<f64> {
        self.ensure_same_frame_as(point)?;
        Ok(cross_2d(&self.direction, &(point.point() - self.origin)))
    }
}

impl InFrame for FrameLine2 {
    fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }
}
