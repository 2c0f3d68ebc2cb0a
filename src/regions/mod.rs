//! Colored anatomical regions.
//!
//! Filled freeform shapes are classified by color, their outlines decoded
//! into document space and then reassigned to the source picture they are
//! drawn over, with coordinates relative to that picture.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bonebox::ooxml::drawings::ScalingMode;
//! use bonebox::ooxml::opc::Relationships;
//! use bonebox::ooxml::pptx::Slide;
//! use bonebox::regions::{ClassifierMode, ImagePartition, RegionDocument, RegionExtractor, SourceImage};
//! use std::collections::HashMap;
//!
//! let slide = Slide::open("slides/slide2.xml")?;
//! let rels = Relationships::open("slides/_rels/slide2.xml.rels")?;
//! let overrides = HashMap::new();
//! let extractor = RegionExtractor::new(ClassifierMode::Exact.classifier(), ScalingMode::Truncated, &overrides);
//! let regions = extractor.extract(&slide, &rels);
//!
//! let images = slide.pictures().map(|p| SourceImage::new(p.name, p.bounds)).collect();
//! let doc = RegionDocument::build(slide.number(), &ImagePartition::new(images), regions);
//! println!("{} regions", doc.region_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod calibrate;
pub mod classify;
pub mod document;
pub mod extract;
pub mod layout;
pub mod partition;

pub use calibrate::{Calibration, IndexedOffset, Offset, apply_offsets, calibrate_file};
pub use classify::{ClassifierMode, ColorClassifier, ColorMatch, ExactColorMap, HeuristicClassifier};
pub use document::{ImageRegions, RegionDocument};
pub use extract::{ColoredRegion, RegionExtractor};
pub use layout::{LayoutJob, LayoutMetadata, LayoutTemplate, PictureSelection, SideBySide};
pub use partition::{ImagePartition, SourceImage};
