//! Output documents and how they are written.
use crate::common::Result;
use crate::regions::document::RegionDocument;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const AGGREGATE_FILE: &str = "all_colored_regions.json";
pub const SUMMARY_FILE: &str = "extraction_summary.json";

pub fn regions_file(out_dir: &Path, slide: u32) -> PathBuf {
    out_dir.join(format!("slide{slide}_colored_regions.json"))
}

pub fn annotations_file(out_dir: &Path, slide: u32) -> PathBuf {
    out_dir.join(format!("slide{slide}_text_annotations.json"))
}

/// Write a value as pretty-printed JSON, creating parent directories.
///
/// The same value always produces the same bytes.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}

/// `all_colored_regions.json`: every region document of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateDocument<'a> {
    pub total_slides: usize,
    pub total_colored_regions: usize,
    /// Distinct color names, sorted
    pub colors_used: Vec<String>,
    /// Slides with at least one linked region, ascending
    pub slides_with_hyperlinks: Vec<u32>,
    pub slides: &'a [RegionDocument],
}

impl<'a> AggregateDocument<'a> {
    pub fn new(slides: &'a [RegionDocument]) -> Self {
        let colors_used: BTreeSet<&str> = slides
            .iter()
            .flat_map(RegionDocument::regions)
            .map(|r| r.color_name.as_str())
            .collect();
        let linked: BTreeSet<u32> = slides
            .iter()
            .filter(|doc| doc.regions().any(|r| r.hyperlink_target.is_some()))
            .map(|doc| doc.slide_number)
            .collect();
        Self {
            total_slides: slides.len(),
            total_colored_regions: slides.iter().map(RegionDocument::region_count).sum(),
            colors_used: colors_used.into_iter().map(str::to_string).collect(),
            slides_with_hyperlinks: linked.into_iter().collect(),
            slides,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::geometry::BoundingBox;
    use crate::regions::extract::ColoredRegion;
    use crate::regions::partition::ImagePartition;
    use tempfile::TempDir;

    fn region(color_name: &str, link: Option<u32>) -> ColoredRegion {
        ColoredRegion {
            anatomical_name: "Ischium".into(),
            color: "C133AD".into(),
            color_name: color_name.into(),
            shape_id: "4".into(),
            hyperlink_target: link,
            path_data: Vec::new(),
            bounds: BoundingBox::default(),
            image_index: None,
        }
    }

    #[test]
    fn test_aggregate_totals() {
        let partition = ImagePartition::new(Vec::new());
        let docs = vec![
            RegionDocument::build(2, &partition, vec![region("pink", Some(6)), region("green", None)]),
            RegionDocument::build(3, &partition, vec![region("orange", None), region("pink", None)]),
        ];
        let aggregate = AggregateDocument::new(&docs);
        assert_eq!(aggregate.total_slides, 2);
        assert_eq!(aggregate.total_colored_regions, 4);
        assert_eq!(aggregate.colors_used, ["green", "orange", "pink"]);
        assert_eq!(aggregate.slides_with_hyperlinks, [2]);
    }

    #[test]
    fn test_write_json_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = regions_file(&dir.path().join("out/annotations"), 5);
        write_json(&path, &serde_json::json!({"a": 1})).unwrap();
        assert!(path.ends_with("slide5_colored_regions.json"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
