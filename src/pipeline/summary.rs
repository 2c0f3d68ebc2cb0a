//! Run summary (`extraction_summary.json`).
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Why a slide, or one output of it, was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoRegions,
    NoLabels,
    /// The slide or its relationships could not be read
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoRegions => write!(f, "skipped: no regions"),
            SkipReason::NoLabels => write!(f, "skipped: no labels"),
            SkipReason::Unreadable(why) => write!(f, "skipped: {why}"),
        }
    }
}

impl Serialize for SkipReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which document a skip applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Slide,
    Regions,
    Annotations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub slide: u32,
    pub output: OutputKind,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlideSummary {
    pub regions_found: usize,
    pub anatomical_names: Vec<String>,
    pub text_annotations_found: usize,
}

/// What a run produced and what it left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Slides considered
    pub total_slides: usize,
    /// Slides with at least one document written
    pub slides_processed: Vec<u32>,
    pub slides_with_annotations: Vec<u32>,
    pub extraction_summary: BTreeMap<u32, SlideSummary>,
    pub skipped: Vec<Skipped>,
}

impl RunSummary {
    pub fn skip(&mut self, slide: u32, output: OutputKind, reason: SkipReason) {
        self.skipped.push(Skipped {
            slide,
            output,
            reason,
        });
    }

    /// Skips recorded for a slide.
    pub fn skips_for(&self, slide: u32) -> impl Iterator<Item = &Skipped> {
        self.skipped.iter().filter(move |s| s.slide == slide)
    }

    pub fn processed_count(&self) -> usize {
        self.slides_processed.len()
    }

    /// Slides with nothing written.
    pub fn skipped_count(&self) -> usize {
        self.total_slides.saturating_sub(self.processed_count())
    }
}
