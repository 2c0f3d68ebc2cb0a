//! Slide-by-slide extraction runs.
//!
//! Slides are independent: each is parsed, extracted and associated on its
//! own (on the rayon pool when enabled). Results are collected and written
//! afterwards in ascending slide order by a single writer, followed by the
//! aggregate and the run summary.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bonebox::config::PipelineConfig;
//! use bonebox::pipeline::{Pipeline, SlideSelection, SlideSource, Stages};
//!
//! let source = SlideSource::new("deck/ppt/slides", "deck/ppt/slides/_rels")?;
//! let pipeline = Pipeline::new(PipelineConfig::default(), source, "annotations", Stages::ALL);
//! let summary = pipeline.run(&SlideSelection::All)?;
//! println!("{} slides processed", summary.processed_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod output;
pub mod source;
pub mod summary;

pub use output::{AggregateDocument, write_json};
pub use source::{SlideSelection, SlideSource};
pub use summary::{OutputKind, RunSummary, SkipReason, SlideSummary};

use crate::annotations::{AnnotationExtractor, TextAnnotationDocument};
use crate::common::Result;
use crate::config::PipelineConfig;
use crate::ooxml::opc::Relationships;
use crate::ooxml::pptx::Slide;
use crate::regions::calibrate::apply_offsets;
use crate::regions::document::RegionDocument;
use crate::regions::extract::RegionExtractor;
use crate::regions::partition::{ImagePartition, SourceImage};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Which per-slide documents a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stages {
    pub regions: bool,
    pub annotations: bool,
}

impl Stages {
    pub const ALL: Stages = Stages {
        regions: true,
        annotations: true,
    };
    pub const REGIONS: Stages = Stages {
        regions: true,
        annotations: false,
    };
    pub const ANNOTATIONS: Stages = Stages {
        regions: false,
        annotations: true,
    };
}

/// Everything extracted from one slide, before anything is written.
#[derive(Debug)]
struct SlideResult {
    number: u32,
    regions: Option<RegionDocument>,
    annotations: Option<TextAnnotationDocument>,
    skipped: Vec<(OutputKind, SkipReason)>,
}

impl SlideResult {
    fn new(number: u32) -> Self {
        Self {
            number,
            regions: None,
            annotations: None,
            skipped: Vec::new(),
        }
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    source: SlideSource,
    out_dir: PathBuf,
    stages: Stages,
    annotator: AnnotationExtractor,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        source: SlideSource,
        out_dir: impl Into<PathBuf>,
        stages: Stages,
    ) -> Self {
        let annotator = AnnotationExtractor::new(config.bone_set.clone(), config.association_settings());
        Self {
            config,
            source,
            out_dir: out_dir.into(),
            stages,
            annotator,
        }
    }

    /// Process the selected slides and write every output.
    ///
    /// Per-slide failures are logged and recorded in the summary; only
    /// failing to list the slides directory or to write an output is an
    /// error.
    pub fn run(&self, selection: &SlideSelection) -> Result<RunSummary> {
        let numbers = self.source.select(selection, self.config.skip_title_slide)?;
        info!(
            slides = numbers.len(),
            dir = %self.source.slides_dir().display(),
            parallel = self.config.parallel,
            "starting extraction"
        );

        let results: Vec<SlideResult> = if self.config.parallel {
            numbers.par_iter().map(|&n| self.process_slide(n)).collect()
        } else {
            numbers.iter().map(|&n| self.process_slide(n)).collect()
        };

        let summary = self.write_outputs(results)?;
        info!(
            processed = summary.processed_count(),
            skipped = summary.skipped_count(),
            "extraction finished"
        );
        Ok(summary)
    }

    fn process_slide(&self, number: u32) -> SlideResult {
        let mut result = SlideResult::new(number);
        let (slide, rels) = match self.source.load(number) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(slide = number, error = %e, "skipping slide");
                result
                    .skipped
                    .push((OutputKind::Slide, SkipReason::Unreadable(e.to_string())));
                return result;
            },
        };

        if self.stages.regions {
            result.regions = self.extract_regions(&slide, &rels);
            if result.regions.is_none() {
                warn!(slide = number, "no colored regions, skipping region output");
                result.skipped.push((OutputKind::Regions, SkipReason::NoRegions));
            }
        }
        if self.stages.annotations {
            let doc = self.annotator.extract(&slide, &rels);
            if doc.text_annotations.is_empty() {
                warn!(slide = number, "no white labels, skipping annotation output");
                result.skipped.push((OutputKind::Annotations, SkipReason::NoLabels));
            } else {
                result.annotations = Some(doc);
            }
        }
        result
    }

    fn extract_regions(&self, slide: &Slide, rels: &Relationships) -> Option<RegionDocument> {
        let extractor = RegionExtractor::new(
            self.config.classifier.classifier(),
            self.config.scaling,
            &self.config.region_names,
        );
        let regions = extractor.extract(slide, rels);
        if regions.is_empty() {
            return None;
        }

        let images: Vec<SourceImage> = self
            .config
            .pictures
            .select(slide.pictures().collect())
            .iter()
            .map(|p| SourceImage::from_picture(p, rels, self.source.slides_dir()))
            .collect();
        debug!(slide = slide.number(), images = images.len(), "source images");

        let mut doc = RegionDocument::build(slide.number(), &ImagePartition::new(images), regions);
        if !self.config.calibration.is_empty() {
            apply_offsets(&mut doc, &self.config.calibration);
        }
        Some(doc)
    }

    fn write_outputs(&self, results: Vec<SlideResult>) -> Result<RunSummary> {
        let mut summary = RunSummary {
            total_slides: results.len(),
            ..RunSummary::default()
        };
        let mut region_docs = Vec::new();

        for result in results {
            let number = result.number;
            for (output, reason) in result.skipped {
                summary.skip(number, output, reason);
            }
            if result.regions.is_none() && result.annotations.is_none() {
                continue;
            }

            let mut entry = SlideSummary::default();
            if let Some(doc) = result.regions {
                let path = output::regions_file(&self.out_dir, number);
                write_json(&path, &doc)?;
                info!(slide = number, regions = doc.region_count(), path = %path.display(), "wrote regions");
                entry.regions_found = doc.region_count();
                entry.anatomical_names = doc.regions().map(|r| r.anatomical_name.clone()).collect();
                region_docs.push(doc);
            }
            if let Some(doc) = result.annotations {
                let path = output::annotations_file(&self.out_dir, number);
                write_json(&path, &doc)?;
                info!(slide = number, labels = doc.total_text_annotations, path = %path.display(), "wrote annotations");
                entry.text_annotations_found = doc.total_text_annotations;
                summary.slides_with_annotations.push(number);
            }
            summary.slides_processed.push(number);
            summary.extraction_summary.insert(number, entry);
        }

        if self.stages.regions && self.config.aggregate {
            let path = self.out_dir.join(output::AGGREGATE_FILE);
            write_json(&path, &AggregateDocument::new(&region_docs))?;
            info!(slides = region_docs.len(), path = %path.display(), "wrote aggregate");
        }
        let path = self.out_dir.join(output::SUMMARY_FILE);
        write_json(&path, &summary)?;
        info!(path = %path.display(), "wrote summary");
        Ok(summary)
    }
}
