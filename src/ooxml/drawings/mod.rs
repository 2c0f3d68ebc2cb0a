//! DrawingML (DML) support for slide shapes.
//!
//! DrawingML is the namespace that defines shape geometry, transforms and
//! fills inside PresentationML slides.
//!
//! This module reads the pieces region extraction depends on: transforms
//! (`a:xfrm`), custom geometry paths and fill colors.

pub mod color;
pub mod path;
pub mod xfrm;

pub use color::{ColorRef, Fill};
pub use path::{PathCommand, RawPath, RawSegment, ScalingMode, SegmentKind, ShapePath};
pub use xfrm::{GroupFrame, Transform};
