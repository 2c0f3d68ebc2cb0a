//! Side-by-side layout of the two main pictures of a slide.
//!
//! Bone slides show the same bone from two views, as two large pictures
//! next to each other. The layout template records where those pictures sit
//! relative to the box covering both, so a renderer can reproduce the layout
//! at any size. An audit compares other slides against the template.
use crate::common::geometry::BoundingBox;
use crate::common::unit::rotation_to_degrees;
use crate::common::{Error, Result};
use crate::ooxml::opc::Relationships;
use crate::ooxml::pptx::{Picture, Slide};
use crate::pipeline::output::write_json;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SIDE_BY_SIDE: &str = "side-by-side";
pub const NORM_BASIS: &str = "two-image-union";
pub const FEWER_THAN_TWO_PICTURES: &str = "fewer-than-two-pics";
pub const DEFAULT_TOLERANCE: f64 = 0.02;

/// Which pictures of a slide count as source images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PictureSelection {
    /// Keep at most this many pictures, largest first. `None` keeps all.
    pub max_images: Option<usize>,
    /// Pictures smaller than this fraction of the largest one are dropped.
    pub min_area_fraction: f64,
}

impl Default for PictureSelection {
    fn default() -> Self {
        Self {
            max_images: Some(2),
            min_area_fraction: 0.05,
        }
    }
}

impl PictureSelection {
    /// Pick the largest pictures, in decreasing area order.
    ///
    /// When fewer than `max_images` pictures survive the area filter, the
    /// filter is ignored and the largest pictures are taken regardless of
    /// size. Equal areas keep document order.
    pub fn select(&self, mut pictures: Vec<Picture>) -> Vec<Picture> {
        pictures.sort_by(|a, b| b.bounds.area().total_cmp(&a.bounds.area()));
        let Some(largest) = pictures.first() else {
            return pictures;
        };
        let threshold = largest.bounds.area() * self.min_area_fraction;
        let kept = pictures
            .iter()
            .filter(|p| p.bounds.area() >= threshold)
            .count();

        match self.max_images {
            Some(max) if kept < max => {
                pictures.truncate(max);
                pictures
            },
            max => {
                let mut filtered: Vec<Picture> = pictures
                    .into_iter()
                    .filter(|p| p.bounds.area() >= threshold)
                    .collect();
                if let Some(max) = max {
                    filtered.truncate(max);
                }
                filtered
            },
        }
    }
}

/// One picture relative to the union box of both pictures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPicture {
    #[serde(rename = "normX")]
    pub norm_x: f64,
    #[serde(rename = "normY")]
    pub norm_y: f64,
    #[serde(rename = "normW")]
    pub norm_w: f64,
    #[serde(rename = "normH")]
    pub norm_h: f64,
    pub rot_deg: f64,
    pub rot_emu: i64,
    #[serde(rename = "flipH")]
    pub flip_h: bool,
    #[serde(rename = "flipV")]
    pub flip_v: bool,
}

impl NormalizedPicture {
    /// Normalize against `basis`. A zero basis dimension is treated as 1.
    pub fn new(picture: &Picture, basis: &BoundingBox) -> Self {
        let w = if basis.width == 0 { 1.0 } else { basis.width as f64 };
        let h = if basis.height == 0 { 1.0 } else { basis.height as f64 };
        Self {
            norm_x: (picture.bounds.x - basis.x) as f64 / w,
            norm_y: (picture.bounds.y - basis.y) as f64 / h,
            norm_w: picture.bounds.width as f64 / w,
            norm_h: picture.bounds.height as f64 / h,
            rot_deg: rotation_to_degrees(picture.rotation),
            rot_emu: picture.rotation,
            flip_h: picture.flip_h,
            flip_v: picture.flip_v,
        }
    }

    /// Names of the fields that differ from `expected` by more than the
    /// tolerance (10x the tolerance for degrees).
    fn mismatches(&self, expected: &Self, tolerance: f64) -> Vec<&'static str> {
        let close = |a: f64, b: f64, tol: f64| (a - b).abs() <= tol;
        let mut out = Vec::new();
        for (name, got, want) in [
            ("normX", self.norm_x, expected.norm_x),
            ("normY", self.norm_y, expected.norm_y),
            ("normW", self.norm_w, expected.norm_w),
            ("normH", self.norm_h, expected.norm_h),
        ] {
            if !close(got, want, tolerance) {
                out.push(name);
            }
        }
        if !close(self.rot_deg, expected.rot_deg, tolerance * 10.0) {
            out.push("rot_deg");
        }
        out
    }
}

/// The two main pictures of a slide, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct SideBySide {
    pub left: Picture,
    pub right: Picture,
}

impl SideBySide {
    /// Find the two largest pictures of a slide.
    pub fn detect(slide: &Slide, min_area_fraction: f64) -> Option<Self> {
        let selection = PictureSelection {
            max_images: Some(2),
            min_area_fraction,
        };
        let mut pair = selection.select(slide.pictures().collect());
        if pair.len() < 2 {
            return None;
        }
        pair.sort_by_key(|p| p.bounds.x);
        let right = pair.pop()?;
        let left = pair.pop()?;
        Some(Self { left, right })
    }

    /// Box covering both pictures.
    pub fn union(&self) -> BoundingBox {
        self.left.bounds.union(&self.right.bounds)
    }

    pub fn normalized(&self) -> NormalizedGeometry {
        let basis = self.union();
        NormalizedGeometry {
            layout: SIDE_BY_SIDE.to_string(),
            left: NormalizedPicture::new(&self.left, &basis),
            right: NormalizedPicture::new(&self.right, &basis),
            norm_basis: NORM_BASIS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGeometry {
    pub layout: String,
    pub left: NormalizedPicture,
    pub right: NormalizedPicture,
    pub norm_basis: String,
}

/// Layout template taken from a representative slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTemplate {
    pub bone_set: String,
    pub display_format: String,
    pub extracted_from_slide: u32,
    pub normalized_geometry: NormalizedGeometry,
}

impl LayoutTemplate {
    pub fn from_slide(slide: &Slide, bone_set: &str, min_area_fraction: f64) -> Result<Self> {
        let pair = SideBySide::detect(slide, min_area_fraction).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "template slide {} must contain two main pictures",
                slide.number()
            ))
        })?;
        Ok(Self {
            bone_set: bone_set.to_string(),
            display_format: SIDE_BY_SIDE.to_string(),
            extracted_from_slide: slide.number(),
            normalized_geometry: pair.normalized(),
        })
    }

    /// Compare a slide's pictures with the template.
    pub fn audit(&self, slide: &Slide, tolerance: f64, min_area_fraction: f64) -> AuditResult {
        let Some(pair) = SideBySide::detect(slide, min_area_fraction) else {
            return AuditResult {
                slide: slide.number(),
                ok: false,
                fails: None,
                reason: Some(FEWER_THAN_TWO_PICTURES.to_string()),
            };
        };
        let got = pair.normalized();
        let want = &self.normalized_geometry;
        let mut fails = Vec::new();
        for (side, got, want) in [("left", &got.left, &want.left), ("right", &got.right, &want.right)] {
            fails.extend(
                got.mismatches(want, tolerance)
                    .into_iter()
                    .map(|field| format!("{side}.{field}")),
            );
        }
        AuditResult {
            slide: slide.number(),
            ok: fails.is_empty(),
            fails: Some(fails),
            reason: None,
        }
    }
}

/// Per-slide layout metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideLayoutMetadata {
    pub slide: u32,
    pub bone_set: String,
    pub left_media: Option<String>,
    pub right_media: Option<String>,
    pub subbone: Option<String>,
    pub sub_subbone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub left_media_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub right_media_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub left_media_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub right_media_path: Option<String>,
}

impl SlideLayoutMetadata {
    pub fn new(slide: u32, bone_set: &str, pair: &SideBySide) -> Self {
        Self {
            slide,
            bone_set: bone_set.to_string(),
            left_media: pair.left.image.clone(),
            right_media: pair.right.image.clone(),
            subbone: None,
            sub_subbone: None,
            left_media_target: None,
            right_media_target: None,
            left_media_path: None,
            right_media_path: None,
        }
    }

    /// Fill in relationship targets and resolved media paths.
    ///
    /// Unresolvable references become empty strings, so the fields are
    /// always present once relationships were consulted.
    pub fn resolve_media(&mut self, rels: &Relationships, slides_dir: &Path) {
        let resolve = |r_id: Option<&str>| {
            r_id.and_then(|id| rels.get(id))
                .filter(|rel| !rel.target_ref().is_empty())
                .map(|rel| {
                    (
                        rel.target_ref().to_string(),
                        rel.target_path(slides_dir).display().to_string(),
                    )
                })
                .unwrap_or_default()
        };
        let (target, path) = resolve(self.left_media.as_deref());
        self.left_media_target = Some(target);
        self.left_media_path = Some(path);
        let (target, path) = resolve(self.right_media.as_deref());
        self.right_media_target = Some(target);
        self.right_media_path = Some(path);
    }
}

/// Outcome of auditing one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub slide: u32,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSection {
    pub tolerance: f64,
    pub verified_slides: Vec<u32>,
    pub failed_slides: Vec<AuditResult>,
}

/// Metadata document written next to the template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub slides: Vec<SlideLayoutMetadata>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub audit: Option<AuditSection>,
}

/// A layout run over a set of slides.
#[derive(Debug, Clone)]
pub struct LayoutJob {
    pub slides_dir: PathBuf,
    pub rels_dir: Option<PathBuf>,
    pub slides: Vec<u32>,
    pub representative: u32,
    pub bone_set: String,
    pub min_area_fraction: f64,
    /// Audit tolerance; `None` disables the audit.
    pub audit: Option<f64>,
}

impl LayoutJob {
    fn slide_path(&self, number: u32) -> PathBuf {
        self.slides_dir.join(format!("slide{number}.xml"))
    }

    fn relationships(&self, number: u32) -> Option<Relationships> {
        let dir = self.rels_dir.as_ref()?;
        match Relationships::open(dir.join(format!("slide{number}.xml.rels"))) {
            Ok(rels) => Some(rels),
            Err(e) => {
                warn!(slide = number, error = %e, "relationships unavailable, media left unresolved");
                Some(Relationships::new())
            },
        }
    }

    /// Build the template and the per-slide metadata.
    ///
    /// The representative slide must exist and carry two pictures. Listed
    /// slides that do not exist are skipped; slides with fewer than two
    /// pictures get no metadata entry but are reported by the audit.
    pub fn run(&self) -> Result<(LayoutTemplate, LayoutMetadata)> {
        let representative = Slide::open(self.slide_path(self.representative))?;
        let template =
            LayoutTemplate::from_slide(&representative, &self.bone_set, self.min_area_fraction)?;

        let mut metadata = LayoutMetadata::default();
        let mut audit = self.audit.map(|tolerance| AuditSection {
            tolerance,
            verified_slides: Vec::new(),
            failed_slides: Vec::new(),
        });

        for &number in &self.slides {
            let path = self.slide_path(number);
            if !path.is_file() {
                debug!(slide = number, "slide not present, skipping");
                continue;
            }
            let slide = match Slide::open(&path) {
                Ok(slide) => slide,
                Err(e) => {
                    warn!(slide = number, error = %e, "skipping unreadable slide");
                    continue;
                },
            };

            match SideBySide::detect(&slide, self.min_area_fraction) {
                Some(pair) => {
                    let mut entry = SlideLayoutMetadata::new(number, &self.bone_set, &pair);
                    if let Some(rels) = self.relationships(number) {
                        entry.resolve_media(&rels, &self.slides_dir);
                    }
                    metadata.slides.push(entry);
                },
                None => warn!(slide = number, "fewer than two pictures, no layout metadata"),
            }

            if let Some(section) = audit.as_mut() {
                let result = template.audit(&slide, section.tolerance, self.min_area_fraction);
                if result.ok {
                    section.verified_slides.push(result.slide);
                } else {
                    section.failed_slides.push(result);
                }
            }
        }

        metadata.audit = audit;
        Ok((template, metadata))
    }

    /// Run and write both documents.
    pub fn write(&self, template_path: &Path, metadata_path: &Path) -> Result<()> {
        let (template, metadata) = self.run()?;
        write_json(template_path, &template)?;
        write_json(metadata_path, &metadata)?;
        info!(
            template = %template_path.display(),
            metadata = %metadata_path.display(),
            slides = metadata.slides.len(),
            "wrote layout template"
        );
        Ok(())
    }
}
