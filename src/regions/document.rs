//! Per-slide region documents (`slideN_colored_regions.json`).
use crate::regions::extract::ColoredRegion;
use crate::regions::partition::{ImagePartition, SourceImage};
use serde::{Deserialize, Serialize};

/// Regions of one source image, coordinates relative to the image origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRegions {
    pub index: usize,
    pub name: String,
    pub width: i64,
    pub height: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub media_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub media_path: Option<String>,
    pub colored_regions: Vec<ColoredRegion>,
}

impl ImageRegions {
    fn new(index: usize, image: &SourceImage, colored_regions: Vec<ColoredRegion>) -> Self {
        Self {
            index,
            name: image.name.clone(),
            width: image.bounds.width,
            height: image.bounds.height,
            media_target: image.media_target.clone(),
            media_path: image.media_path.clone(),
            colored_regions,
        }
    }
}

/// All regions of a slide grouped by source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDocument {
    pub slide_number: u32,
    pub images: Vec<ImageRegions>,
}

impl RegionDocument {
    /// Partition regions over the slide's images and group them.
    ///
    /// Every image gets an entry, including images without regions.
    pub fn build(
        slide_number: u32,
        partition: &ImagePartition,
        regions: Vec<ColoredRegion>,
    ) -> Self {
        let images = partition
            .images()
            .iter()
            .zip(partition.partition(regions))
            .enumerate()
            .map(|(index, (image, regions))| ImageRegions::new(index, image, regions))
            .collect();
        Self {
            slide_number,
            images,
        }
    }

    /// Regions of every image, in image order.
    pub fn regions(&self) -> impl Iterator<Item = &ColoredRegion> {
        self.images.iter().flat_map(|img| img.colored_regions.iter())
    }

    pub fn region_count(&self) -> usize {
        self.images.iter().map(|img| img.colored_regions.len()).sum()
    }
}
