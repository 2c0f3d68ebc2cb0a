//! Bonebox - colored-region and label extraction for anatomical bone slides
//!
//! Reads the XML parts of an unzipped PowerPoint deck in which bones are
//! drawn as colored freeform shapes over photographs and labelled with white
//! text boxes joined to the bones by white connector lines. Produces JSON
//! documents that a web front end overlays on the photographs.
//!
//! # Features
//!
//! - **Region extraction**: custom geometry paths scaled into slide EMU,
//!   classified by fill color and split across the source photographs
//! - **Annotation extraction**: white labels, their hyperlinks, and the
//!   pointer lines that lead from each label to the bone it names
//! - **Layout templates**: side-by-side photograph geometry normalized for
//!   reuse, with an audit against other slides
//! - **Calibration**: per-image offsets for already written region files
//!
//! # Example - Running the whole pipeline
//!
//! ```no_run
//! use bonebox::config::PipelineConfig;
//! use bonebox::pipeline::{Pipeline, SlideSelection, SlideSource, Stages};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::load("bonebox.yaml")?;
//! let source = SlideSource::new("deck/ppt/slides", "deck/ppt/slides/_rels")?;
//! let summary = Pipeline::new(config, source, "annotations", Stages::ALL)
//!     .run(&"2,3".parse::<SlideSelection>()?)?;
//! for (slide, found) in &summary.extraction_summary {
//!     println!("slide {slide}: {} regions", found.regions_found);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Extracting one slide by hand
//!
//! ```no_run
//! use bonebox::annotations::{AnnotationExtractor, AssociationSettings};
//! use bonebox::ooxml::opc::Relationships;
//! use bonebox::ooxml::pptx::Slide;
//! use bonebox::ooxml::drawings::ScalingMode;
//! use bonebox::regions::{ClassifierMode, RegionExtractor};
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let slide = Slide::open("deck/ppt/slides/slide2.xml")?;
//! let rels = Relationships::open("deck/ppt/slides/_rels/slide2.xml.rels")?;
//!
//! let names = HashMap::new();
//! let extractor = RegionExtractor::new(ClassifierMode::Exact.classifier(), ScalingMode::Truncated, &names);
//! for region in extractor.extract(&slide, &rels) {
//!     println!("{} ({})", region.anatomical_name, region.color_name);
//! }
//!
//! let annotations = AnnotationExtractor::new("Bony Pelvis", AssociationSettings::default())
//!     .extract(&slide, &rels);
//! println!("{} labels", annotations.total_text_annotations);
//! # Ok(())
//! # }
//! ```

/// Error type, units, geometry and the XML element tree
pub mod common;

/// Slide, relationships and DrawingML readers
pub mod ooxml;

/// Colored region extraction, partitioning, calibration and layout
pub mod regions;

/// White labels, pointer lines and label-to-region association
pub mod annotations;

/// Batch runs over a slides directory
pub mod pipeline;

/// YAML pipeline configuration
pub mod config;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
