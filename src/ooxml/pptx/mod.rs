//! PowerPoint (.pptx) slide support.
//!
//! Works on the parts of an already unzipped presentation package: slide
//! markup, the shapes on it and the hyperlinks they carry.
//!
//! # Example
//!
//! ```rust,no_run
//! use bonebox::ooxml::pptx::{ShapeType, Slide};
//!
//! let slide = Slide::open("deck/ppt/slides/slide3.xml")?;
//! for shape in slide.shapes_of(ShapeType::Connector) {
//!     println!("Connector {} at {:?}", shape.id, shape.placement);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod hyperlinks;
pub mod shapes;
pub mod slide;

pub use hyperlinks::Hyperlink;
pub use shapes::{LineStyle, Picture, RunProperties, Shape, ShapeType, TextFrame};
pub use slide::{Slide, slide_number_from_path};
