use std::fmt;
use std::sync::Arc;

use crate::error::FrameError;
use crate::math::Isometry2;

/// Interior node data shared by all handles to the same frame.
struct FrameNode {
    name: String,
    /// Pose of this frame expressed in the common root frame.
    root_from_self: Isometry2,
}

/// An opaque, immutable handle to a coordinate frame.
///
/// Two handles refer to the same frame iff they point at the identical node:
/// equality is by identity, never by name or pose. Handles are cheap to clone
/// and never mutated after construction.
///
/// Frames are created either as a [`root`](ReferenceFrame::root) at the
/// identity pose or as a [`child`](ReferenceFrame::child) of an existing
/// frame. Each node stores its absolute pose, so the two primitives consumed
/// by the rest of the kernel (identity comparison and frame-to-frame
/// transform) are O(1).
#[derive(Clone)]
pub struct ReferenceFrame {
    node: Arc<FrameNode>,
}

impl ReferenceFrame {
    /// Creates a new root frame at the identity pose.
    ///
    /// Every call creates a distinct frame: two roots with the same name are
    /// *not* the same frame.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            node: Arc::new(FrameNode {
                name: name.into(),
                root_from_self: Isometry2::identity(),
            }),
        }
    }

    /// Creates a frame positioned at `pose_in_parent` relative to `self`.
    #[must_use]
    pub fn child(&self, name: impl Into<String>, pose_in_parent: Isometry2) -> Self {
        Self {
            node: Arc::new(FrameNode {
                name: name.into(),
                root_from_self: self.node.root_from_self * pose_in_parent,
            }),
        }
    }

    /// Returns the diagnostic name of the frame.
    ///
    /// Names appear in error messages only; they carry no identity.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Returns `true` iff `other` is the identical frame node.
    #[must_use]
    pub fn is_same_frame(&self, other: &ReferenceFrame) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Fails with [`FrameError::Mismatch`] unless `other` is the same frame.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` naming both frames when they differ.
    pub fn ensure_same_frame(&self, other: &ReferenceFrame) -> std::result::Result<(), FrameError> {
        if self.is_same_frame(other) {
            Ok(())
        } else {
            Err(FrameError::Mismatch {
                expected: self.node.name.clone(),
                found: other.node.name.clone(),
            })
        }
    }

    /// Returns the isometry taking coordinates expressed in `self` into
    /// coordinates expressed in `target`.
    #[must_use]
    pub fn transform_to(&self, target: &ReferenceFrame) -> Isometry2 {
        target.node.root_from_self.inv_mul(&self.node.root_from_self)
    }
}

impl PartialEq for ReferenceFrame {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_frame(other)
    }
}

impl Eq for ReferenceFrame {}

impl fmt::Debug for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceFrame")
            .field("name", &self.node.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node.name)
    }
}

/// Trait for values tagged with the reference frame they are expressed in.
///
/// Every multi-operand operation in the kernel applies one of three policies
/// to its frame-tagged operands:
///
/// - **strict**: compare each operand's frame against the receiver's by
///   identity and fail with [`FrameError::Mismatch`] before any numeric work;
///   nothing is mutated on failure.
/// - **matching frame** (`*_matching_frame` mutators): transform the operand
///   into the receiver's frame instead of checking.
/// - **output relabel** (`*_in` pack operations): unconditionally set the
///   output's frame to the producing object's frame.
///
/// Operands without a frame tag (raw points, vectors, scalars) are trusted to
/// already be expressed in the correct frame and are never checked.
pub trait InFrame {
    /// The frame this value is expressed in.
    fn frame(&self) -> &ReferenceFrame;

    /// Returns `true` iff `other` is expressed in the same frame.
    fn is_same_frame_as<T: InFrame + ?Sized>(&self, other: &T) -> bool {
        self.frame().is_same_frame(other.frame())
    }

    /// Fails with [`FrameError::Mismatch`] unless `other` shares this frame.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Mismatch` when the frames differ.
    fn ensure_same_frame_as<T: InFrame + ?Sized>(
        &self,
        other: &T,
    ) -> std::result::Result<(), FrameError> {
        self.frame().ensure_same_frame(other.frame())
    }
}

impl InFrame for ReferenceFrame {
    fn frame(&self) -> &ReferenceFrame {
        self
    }
}
