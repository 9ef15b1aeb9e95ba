use crate::error::Result;
use crate::frame::{InFrame, ReferenceFrame};
use crate::math::Rotation2;

use super::FrameVector2;

/// A 2D orientation (rotation about the out-of-plane axis) tagged with the
/// reference frame it is expressed in.
#[derive(Debug, Clone)]
pub struct FrameOrientation2 {
    frame: ReferenceFrame,
    rotation: Rotation2,
}

impl FrameOrientation2 {
    /// Creates an orientation at `angle` radians, expressed in `frame`.
    #[must_use]
    pub fn from_angle(frame: &ReferenceFrame, angle: f64) -> Self {
        Self {
            frame: frame.clone(),
            rotation: Rotation2::new(angle),
        }
    }

    /// Creates the identity orientation in `frame`.
    #[must_use]
    pub fn identity(frame: &ReferenceFrame) -> Self {
        Self::from_angle(frame, 0.0)
    }

    /// Returns the rotation angle in `(-π, π]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.rotation.angle()
    }

    /// Returns the raw frame-less payload.
    #[must_use]
    pub fn rotation(&self) -> &Rotation2 {
        &self.rotation
    }

    /// Sets the angle from a raw value, trusted to already be expressed in
    /// this orientation's frame.
    pub fn set_angle(&mut self, angle: f64) {
        self.rotation = Rotation2::new(angle);
    }

    /// Sets this orientation from `other`. Strict: fails on frame mismatch
    /// without mutating.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn set(&mut self, other: &FrameOrientation2) -> Result<()> {
        self.ensure_same_frame_as(other)?;
        self.rotation = other.rotation;
        Ok(())
    }

    /// Sets this orientation from `other`, rotating it into this frame
    /// first. The frame tag is unchanged.
    pub fn set_matching_frame(&mut self, other: &FrameOrientation2) {
        let tf = other.frame.transform_to(&self.frame);
        self.rotation = tf.rotation * other.rotation;
    }

    /// Adopts `other` wholesale: rotation *and* frame (movable-frame set).
    pub fn set_including_frame(&mut self, other: &FrameOrientation2) {
        self.frame = other.frame.clone();
        self.rotation = other.rotation;
    }

    /// Re-expresses this orientation in `target` and redirects the frame tag.
    pub fn change_frame(&mut self, target: &ReferenceFrame) {
        let tf = self.frame.transform_to(target);
        self.rotation = tf.rotation * self.rotation;
        self.frame = target.clone();
    }

    /// Composes `other` on top of this orientation. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn append(&mut self, other: &FrameOrientation2) -> Result<()> {
        self.ensure_same_frame_as(other)?;
        self.rotation *= other.rotation;
        Ok(())
    }

    /// Rotates `vector` by this orientation, producing a vector in this
    /// frame. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `vector` is in a different frame.
    pub fn rotate_vector(&self, vector: &FrameVector2) -> Result<FrameVector2> {
        self.ensure_same_frame_as(vector)?;
        Ok(FrameVector2::from_vector(
            &self.frame,
            self.rotation * vector.vector(),
        ))
    }

    /// Shortest signed angle from this orientation to `other`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn angle_to(&self, other: &FrameOrientation2) -> Result<f64> {
        self.ensure_same_frame_as(other)?;
        Ok(self.rotation.angle_to(&other.rotation))
    }

    /// Returns `true` when `other` shares this frame and the angular
    /// separation is at most `epsilon`.
    #[must_use]
    pub fn epsilon_equals(&self, other: &FrameOrientation2, epsilon: f64) -> bool {
        self.is_same_frame_as(other) && self.rotation.angle_to(&other.rotation).abs() <= epsilon
    }
}

impl InFrame for FrameOrientation2 {
    fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }
}
