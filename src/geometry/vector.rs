use crate::error::Result;
use crate::frame::{InFrame, ReferenceFrame};
use crate::math::{cross_2d, Vector2};

/// A 2D vector tagged with the reference frame it is expressed in.
///
/// Unlike points, vectors are direction/displacement quantities: changing
/// frame applies only the rotation part of the inter-frame transform.
#[derive(Debug, Clone)]
pub struct FrameVector2 {
    frame: ReferenceFrame,
    vector: Vector2,
}

impl FrameVector2 {
    /// Creates a vector `(x, y)` expressed in `frame`.
    #[must_use]
    pub fn new(frame: &ReferenceFrame, x: f64, y: f64) -> Self {
        Self {
            frame: frame.clone(),
            vector: Vector2::new(x, y),
        }
    }

    /// Creates a vector from a raw payload expressed in `frame`.
    #[must_use]
    pub fn from_vector(frame: &ReferenceFrame, vector: Vector2) -> Self {
        Self {
            frame: frame.clone(),
            vector,
        }
    }

    /// Creates the zero vector in `frame`.
    #[must_use]
    pub fn zero(frame: &ReferenceFrame) -> Self {
        Self::new(frame, 0.0, 0.0)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.vector.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.vector.y
    }

    /// Returns the raw frame-less payload.
    #[must_use]
    pub fn vector(&self) -> &Vector2 {
        &self.vector
    }

    #[must_use]
    pub fn norm(&self) -> f64 {
        self.vector.norm()
    }

    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.vector.norm_squared()
    }

    /// Sets the components from raw values, trusted to already be expressed
    /// in this vector's frame.
    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.vector.x = x;
        self.vector.y = y;
    }

    /// Sets this vector from `other`. Strict: fails on frame mismatch without
    /// mutating.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn set(&mut self, other: &FrameVector2) -> Result<()> {
        self.ensure_same_frame_as(other)?;
        self.vector = other.vector;
        Ok(())
    }

    /// Sets this vector from `other`, rotating it into this vector's frame
    /// first. The frame tag is unchanged.
    pub fn set_matching_frame(&mut self, other: &FrameVector2) {
        let tf = other.frame.transform_to(&self.frame);
        self.vector = tf.rotation * other.vector;
    }

    /// Adopts `other` wholesale: components *and* frame (movable-frame set).
    pub fn set_including_frame(&mut self, other: &FrameVector2) {
        self.frame = other.frame.clone();
        self.vector = other.vector;
    }

    /// Re-expresses this vector in `target` and redirects the frame tag.
    /// Only the rotation part of the transform applies.
    pub fn change_frame(&mut self, target: &ReferenceFrame) {
        let tf = self.frame.transform_to(target);
        self.vector = tf.rotation * self.vector;
        self.frame = target.clone();
    }

    /// Dot product with `other`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn dot(&self, other: &FrameVector2) -> Result<f64> {
        self.ensure_same_frame_as(other)?;
        Ok(self.vector.dot(&other.vector))
    }

    /// 2D cross product with `other`. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn cross(&self, other: &FrameVector2) -> Result<f64> {
        self.ensure_same_frame_as(other)?;
        Ok(cross_2d(&self.vector, &other.vector))
    }

    /// Adds `other` in place. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn add(&mut self, other: &FrameVector2) -> Result<()> {
        self.ensure_same_frame_as(other)?;
        self.vector += other.vector;
        Ok(())
    }

    /// Subtracts `other` in place. Strict.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` if `other` is in a different frame.
    pub fn sub(&mut self, other: &FrameVector2) -> Result<()> {
        self.ensure_same_frame_as(other)?;
        self.vector -= other.vector;
        Ok(())
    }

    /// Scales this vector in place.
    pub fn scale(&mut self, factor: f64) {
        self.vector *= factor;
    }

    /// Returns a scaled copy.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> FrameVector2 {
        Self {
            frame: self.frame.clone(),
            vector: self.vector * factor,
        }
    }

    /// Returns the unit vector with this direction, or `None` for the
    /// degenerate zero vector.
    #[must_use]
    pub fn normalized(&self) -> Option<FrameVector2> {
        let norm = self.vector.norm();
        if norm < crate::math::TOLERANCE {
            return None;
        }
        Some(Self {
            frame: self.frame.clone(),
            vector: self.vector / norm,
        })
    }

    /// Returns `true` when `other` shares this frame and both components
    /// differ by at most `epsilon`.
    #[must_use]
    pub fn epsilon_equals(&self, other: &FrameVector2, epsilon: f64) -> bool {
        self.is_same_frame_as(other)
            && (self.vector.x - other.vector.x).abs() <= epsilon
            && (self.vector.y - other.vector.y).abs() <= epsilon
    }
}

impl InFrame for FrameVector2 {
    fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }
}

/// Exact component equality in the identical frame.
impl PartialEq for FrameVector2 {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_frame_as(other) && self.vector == other.vector
    }
}
