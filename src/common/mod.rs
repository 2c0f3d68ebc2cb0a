//! Common types and utilities shared by the markup, extraction and pipeline layers.
//!
//! Everything in here is format-agnostic: the error taxonomy, EMU unit helpers,
//! integer geometry primitives, the generic XML element tree and RGB colors.

// Submodule declarations
pub mod error;
pub mod geometry;
pub mod style;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Point};
pub use style::RGBColor;
