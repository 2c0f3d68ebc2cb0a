//! Office Open XML (OOXML) slide-part readers.
//!
//! Works on the parts of an unzipped presentation package rather than on the
//! ZIP container itself.
//!
//! # Architecture
//!
//! The module is organized into several layers:
//!
//! 1. **OPC Layer** (`opc`): relationships parts (`_rels/*.rels`)
//! 2. **DrawingML** (`drawings`): transforms, custom geometry paths and fills
//! 3. **PresentationML** (`pptx`): slides and the shapes on them
//!
//! # Example: Reading a slide and its relationships
//!
//! ```rust,no_run
//! use bonebox::ooxml::opc::Relationships;
//! use bonebox::ooxml::pptx::Slide;
//!
//! let slide = Slide::open("deck/ppt/slides/slide2.xml")?;
//! let rels = Relationships::open("deck/ppt/slides/_rels/slide2.xml.rels")?;
//! for picture in slide.pictures() {
//!     let target = picture.image.as_deref().and_then(|r_id| rels.get(r_id));
//!     println!("{} -> {:?}", picture.name, target.map(|rel| rel.target_ref()));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod drawings;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{Relationship, Relationships};
