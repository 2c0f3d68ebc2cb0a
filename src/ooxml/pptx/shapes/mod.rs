//! Shapes module for slides.
//!
//! This module provides typed views of the drawable elements of a slide:
//! - Autoshapes, freeforms and text boxes
//! - Pictures (images)
//! - Connectors and their line styles
pub mod base;
pub mod connector;
pub mod picture;
pub mod textframe;

pub use base::{Shape, ShapeType};
pub use connector::LineStyle;
pub use picture::Picture;
pub use textframe::{RunProperties, TextFrame};
