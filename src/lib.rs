pub mod error;
pub mod frame;
pub mod geometry;
pub mod math;

pub use error::{PolyframeError, Result};
pub use frame::{InFrame, ReferenceFrame};
