//! Slide discovery in an unzipped presentation.
use crate::common::{Error, Result};
use crate::ooxml::opc::Relationships;
use crate::ooxml::pptx::{Slide, slide_number_from_path};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Which slides a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideSelection {
    /// Every slide found, minus the title slide when configured
    All,
    /// These slide numbers, in the given order
    Only(Vec<u32>),
}

impl FromStr for SlideSelection {
    type Err = Error;

    /// `all`, a slide number, or a comma-separated list of numbers.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.split(',')
            .map(|n| {
                n.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| Error::InvalidArgument(format!("not a slide number: `{n}`")))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::Only)
    }
}

/// Slides directory and its relationships directory.
#[derive(Debug, Clone)]
pub struct SlideSource {
    slides_dir: PathBuf,
    rels_dir: PathBuf,
}

impl SlideSource {
    /// Both directories must exist. Individual relationship files are
    /// checked per slide.
    pub fn new(slides_dir: impl Into<PathBuf>, rels_dir: impl Into<PathBuf>) -> Result<Self> {
        let slides_dir = slides_dir.into();
        if !slides_dir.is_dir() {
            return Err(Error::NotFound(slides_dir));
        }
        let rels_dir = rels_dir.into();
        if !rels_dir.is_dir() {
            return Err(Error::NotFound(rels_dir));
        }
        Ok(Self {
            slides_dir,
            rels_dir,
        })
    }

    #[inline]
    pub fn slides_dir(&self) -> &Path {
        &self.slides_dir
    }

    pub fn slide_path(&self, number: u32) -> PathBuf {
        self.slides_dir.join(format!("slide{number}.xml"))
    }

    pub fn rels_path(&self, number: u32) -> PathBuf {
        self.rels_dir.join(format!("slide{number}.xml.rels"))
    }

    /// Numbers of every `slideN.xml` in the slides directory, ascending.
    pub fn discover(&self) -> Result<Vec<u32>> {
        let mut numbers = Vec::new();
        for entry in std::fs::read_dir(&self.slides_dir)? {
            let path = entry?.path();
            if path.is_file()
                && let Some(number) = slide_number_from_path(&path)
            {
                numbers.push(number);
            }
        }
        numbers.sort_unstable();
        numbers.dedup();
        debug!(dir = %self.slides_dir.display(), slides = numbers.len(), "discovered slides");
        Ok(numbers)
    }

    /// Resolve a selection to slide numbers.
    pub fn select(&self, selection: &SlideSelection, skip_title_slide: bool) -> Result<Vec<u32>> {
        match selection {
            SlideSelection::All => {
                let mut numbers = self.discover()?;
                if skip_title_slide {
                    numbers.retain(|&n| n != 1);
                }
                Ok(numbers)
            },
            SlideSelection::Only(numbers) => Ok(numbers.clone()),
        }
    }

    /// Parse a slide and its relationships.
    ///
    /// Either file missing is [`Error::NotFound`].
    pub fn load(&self, number: u32) -> Result<(Slide, Relationships)> {
        let slide = Slide::open(self.slide_path(number))?;
        let rels = Relationships::open(self.rels_path(number))?;
        Ok((slide, rels))
    }
}
