use crate::error::Result;
use crate::frame::{InFrame, ReferenceFrame};
use crate::math::Point2;

use super::FrameVector2;

/// A 2D point tagged with the reference frame it is expressed in.
///
/// The frame tag is fixed by every operation except the movable-frame ones
/// ([`set_including_frame`](Self::set_including_frame) and
/// [`change_frame`](Self::change_frame)), which redirect it.
#[derive(Debug, Clone)]
pub struct FramePoint2 {
    frame: ReferenceFrame,
    point: Point2,
}

impl FramePoint2 {
    /// Creates a point at `(x, y)` expressed in `frame`.
    #[must_use]
    pub fn new(frame: &ReferenceFrame, x: f64, y: f64) -> Self {
        Self {
            frame: frame.clone(),
            point: Point2::new(x, y),
        }
    }

    /// Creates a point from a raw payload expressed in `frame`.
    #[must_use]
    pub fn from_point(frame: &ReferenceFrame, point: Point2) -> Self {
        Self {
            frame: frame.clone(),
            point,
        }
    }

    /// Creates the origin of `frame`.
    #[must_use]
    pub fn origin(frame: &ReferenceFrame) -> Self {
        Self::new(frame, 0.0, 0.0)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    /// Returns the raw frame-less payload.
    #[must_use]
    pub fn point(&self) -> &Point2 {
        &self.point
    }

    /// Sets the coordinates from raw values, trusted to already be expressed
    /// in this point's frame.
    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.point.x = x;
        self.point.y = y;
    }

    /// Sets this point from `other`. Strict: fails on frame mismatch without
    /// mutating.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn set(&mut self, other: &FramePoint2) -> Result<()> {
        self.ensure_same_frame_as(other)?;
        self.point = other.point;
        Ok(())
    }

    /// Sets this point from `other`, transforming it into this point's frame
    /// first. The frame tag is unchanged.
    pub fn set_matching_frame(&mut self, other: &FramePoint2) {
        let tf = other.frame.transform_to(&self.frame);
        self.point = tf * other.point;
    }

    /// Adopts `other` wholesale: coordinates *and* frame (movable-frame set).
    pub fn set_including_frame(&mut self, other: &FramePoint2) {
        self.frame = other.frame.clone();
        self.point = other.point;
    }

    /// Output-frame assignment for pack-style producers: relabels the frame
    /// and overwrites the payload.
    pub(crate) fn pack(&mut self, frame: &ReferenceFrame, point: Point2) {
        self.frame = frame.clone();
        self.point = point;
    }

    /// Re-expresses this point in `target` and redirects the frame tag.
    pub fn change_frame(&mut self, target: &ReferenceFrame) {
        let tf = self.frame.transform_to(target);
        self.point = tf * self.point;
        self.frame = target.clone();
    }

    /// Distance to `other`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn distance_to(&self, other: &FramePoint2) -> Result<f64> {
        self.ensure_same_frame_as(other)?;
        Ok((self.point - other.point).norm())
    }

    /// Squared distance to `other`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn distance_squared_to(&self, other: &FramePoint2) -> Result<f64> {
        self.ensure_same_frame_as(other)?;
        Ok((self.point - other.point).norm_squared())
    }

    /// Translates this point in place by `vector`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `vector` is in a different frame.
    pub fn add_vector(&mut self, vector: &FrameVector2) -> Result<()> {
        self.ensure_same_frame_as(vector)?;
        self.point += *vector.vector();
        Ok(())
    }

    /// Translates this point in place by `-vector`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `vector` is in a different frame.
    pub fn sub_vector(&mut self, vector: &FrameVector2) -> Result<()> {
        self.ensure_same_frame_as(vector)?;
        self.point -= *vector.vector();
        Ok(())
    }

    /// Returns a new point translated by `vector`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `vector` is in a different frame.
    pub fn added(&self, vector: &FrameVector2) -> Result<FramePoint2> {
        self.ensure_same_frame_as(vector)?;
        Ok(Self {
            frame: self.frame.clone(),
            point: self.point + *vector.vector(),
        })
    }

    /// Returns a new point translated by `-vector`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `vector` is in a different frame.
    pub fn subbed(&self, vector: &FrameVector2) -> Result<FramePoint2> {
        self.ensure_same_frame_as(vector)?;
        Ok(Self {
            frame: self.frame.clone(),
            point: self.point - *vector.vector(),
        })
    }

    /// Returns `true` when `other` shares this frame and both coordinates
    /// differ by at most `epsilon`.
    #[must_use]
    pub fn epsilon_equals(&self, other: &FramePoint2, epsilon: f64) -> bool {
        self.is_same_frame_as(other)
            && (self.point.x - other.point.x).abs() <= epsilon
            && (self.point.y - other.point.y).abs() <= epsilon
    }
}

impl InFrame for FramePoint2 {
    fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }
}

/// Exact coordinate equality in the identical frame.
impl PartialEq for FramePoint2 {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_frame_as(other) && self.point == other.point
    }
}
