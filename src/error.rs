use thiserror::Error;

/// Top-level error type for the polyframe geometry kernel.
#[derive(Debug, Error)]
pub enum PolyframeError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Polygon(#[from] PolygonError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised by the frame-consistency protocol.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A strict operation was handed an operand expressed in a different
    /// reference frame. Raised before any numeric work; no operand is
    /// mutated. Recoverable by switching to the matching-frame variant.
    #[error("reference frame mismatch: expected `{expected}`, found `{found}`")]
    Mismatch { expected: String, found: String },
}

/// Errors raised by the convex polygon engine.
#[derive(Debug, Error)]
pub enum PolygonError {
    /// A query ran on a polygon whose vertex buffer was mutated after the
    /// last `update()`. Usage error: call `update()` first.
    #[error("polygon is out of date: call update() before querying")]
    OutOfDate,
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Convenience type alias for results using [`PolyframeError`].
pub type Result<T> = std::result::Result<T, PolyframeError>;
