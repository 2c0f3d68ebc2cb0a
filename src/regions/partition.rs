//! Assigning regions to side-by-side source images.
//!
//! Images are ordered left to right. A region belongs to the rightmost image
//! whose left edge is at or left of the region's horizontal center, or to the
//! leftmost image when there is none. With two images this is the half-plane
//! split at the right image's left edge. Overlap with an image's box plays no
//! part.
use crate::common::geometry::BoundingBox;
use crate::common::unit::{DEFAULT_SLIDE_HEIGHT_EMU, DEFAULT_SLIDE_WIDTH_EMU};
use crate::ooxml::opc::Relationships;
use crate::ooxml::pptx::Picture;
use crate::regions::extract::ColoredRegion;
use std::path::Path;
use tracing::warn;

/// A picture regions are drawn over.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub name: String,
    pub bounds: BoundingBox,
    /// Relationship target of the embedded image
    pub media_target: Option<String>,
    /// Target resolved against the slides directory
    pub media_path: Option<String>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            name: name.into(),
            bounds,
            media_target: None,
            media_path: None,
        }
    }

    /// Stand-in covering a default-sized slide, for slides without pictures.
    pub fn whole_slide() -> Self {
        Self::new(
            "slide",
            BoundingBox::new(0, 0, DEFAULT_SLIDE_WIDTH_EMU, DEFAULT_SLIDE_HEIGHT_EMU),
        )
    }

    /// Build from a picture, resolving its media through the slide relationships.
    pub fn from_picture(picture: &Picture, rels: &Relationships, slides_dir: &Path) -> Self {
        let mut image = Self::new(picture.name.clone(), picture.bounds);
        if let Some(r_id) = picture.image.as_deref() {
            match rels.get(r_id) {
                Some(rel) => {
                    image.media_target = Some(rel.target_ref().to_string());
                    image.media_path = Some(rel.target_path(slides_dir).display().to_string());
                },
                None => warn!(r_id, picture = %picture.name, "image relationship not found"),
            }
        }
        image
    }
}

/// Left-to-right ordered source images of one slide.
#[derive(Debug, Clone)]
pub struct ImagePartition {
    images: Vec<SourceImage>,
}

impl ImagePartition {
    /// Order images by left edge. An empty list becomes [`SourceImage::whole_slide`].
    pub fn new(mut images: Vec<SourceImage>) -> Self {
        if images.is_empty() {
            images.push(SourceImage::whole_slide());
        }
        images.sort_by_key(|img| img.bounds.x);
        Self { images }
    }

    #[inline]
    pub fn images(&self) -> &[SourceImage] {
        &self.images
    }

    /// Index of the image a horizontal center falls to.
    pub fn assign(&self, centroid_x: f64) -> usize {
        self.images[1..].partition_point(|img| img.bounds.x as f64 <= centroid_x)
    }

    /// Assign every region and rewrite its coordinates relative to its image.
    ///
    /// Returns one list per image, in image order; region order is kept.
    pub fn partition(&self, regions: Vec<ColoredRegion>) -> Vec<Vec<ColoredRegion>> {
        let mut buckets = vec![Vec::new(); self.images.len()];
        for mut region in regions {
            let index = self.assign(region.centroid_x());
            let origin = self.images[index].bounds.origin();
            region.translate(-origin.x, -origin.y);
            region.image_index = Some(index);
            buckets[index].push(region);
        }
        buckets
    }
}
