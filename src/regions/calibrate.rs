//! Manual per-image offsets for region coordinates.
//!
//! Offsets correct systematic misalignment against a differently scaled
//! display surface. They are added in place every time they are applied, so
//! applying the same offset twice shifts twice.
use crate::common::{Error, Result};
use crate::pipeline::output::write_json;
use crate::regions::document::RegionDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Shift applied to every coordinate of one image's regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default)]
    pub dx: i64,
    #[serde(default)]
    pub dy: i64,
}

impl Offset {
    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// The offset that undoes this one.
    pub const fn inverse(self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

/// Offsets keyed by image index.
pub type Calibration = BTreeMap<usize, Offset>;

/// An `INDEX:DX,DY` command-line argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedOffset {
    pub index: usize,
    pub offset: Offset,
}

impl FromStr for IndexedOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument(format!("expected INDEX:DX,DY, got `{s}`"));
        let (index, rest) = s.split_once(':').ok_or_else(invalid)?;
        let (dx, dy) = rest.split_once(',').ok_or_else(invalid)?;
        Ok(Self {
            index: index.trim().parse().map_err(|_| invalid())?,
            offset: Offset::new(
                dx.trim().parse().map_err(|_| invalid())?,
                dy.trim().parse().map_err(|_| invalid())?,
            ),
        })
    }
}

/// Apply offsets in place. Returns the number of regions moved.
pub fn apply_offsets(doc: &mut RegionDocument, calibration: &Calibration) -> usize {
    let mut moved = 0;
    for image in &mut doc.images {
        let Some(offset) = calibration.get(&image.index) else {
            continue;
        };
        for region in &mut image.colored_regions {
            region.translate(offset.dx, offset.dy);
            moved += 1;
        }
    }
    moved
}

/// Calibrate a written region document.
///
/// Reads `input`, applies the offsets and writes the result to `output`
/// (which may be the same file).
pub fn calibrate_file(input: &Path, output: &Path, calibration: &Calibration) -> Result<usize> {
    if !input.is_file() {
        return Err(Error::NotFound(input.to_path_buf()));
    }
    let mut doc: RegionDocument = serde_json::from_slice(&std::fs::read(input)?)?;
    let moved = apply_offsets(&mut doc, calibration);
    write_json(output, &doc)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        regions = moved,
        "calibrated region document"
    );
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::geometry::BoundingBox;
    use crate::ooxml::drawings::{PathCommand, ShapePath};
    use crate::regions::extract::ColoredRegion;
    use crate::regions::partition::{ImagePartition, SourceImage};
    use tempfile::TempDir;

    fn doc() -> RegionDocument {
        let region = |x: i64| ColoredRegion {
            anatomical_name: "Ischium".into(),
            color: "C133AD".into(),
            color_name: "pink".into(),
            shape_id: "4".into(),
            hyperlink_target: None,
            path_data: vec![ShapePath {
                path_width: 1,
                path_height: 1,
                commands: vec![
                    PathCommand::QuadBezierTo {
                        x1: x,
                        y1: 10,
                        x: x + 5,
                        y: 20,
                    },
                    PathCommand::Close,
                ],
            }],
            bounds: BoundingBox::new(x, 0, 0, 0),
            image_index: None,
        };
        let partition = ImagePartition::new(vec![
            SourceImage::new("left", BoundingBox::new(0, 0, 50, 50)),
            SourceImage::new("right", BoundingBox::new(100, 0, 50, 50)),
        ]);
        RegionDocument::build(2, &partition, vec![region(10), region(110)])
    }

    fn first_command(doc: &RegionDocument, image: usize) -> PathCommand {
        doc.images[image].colored_regions[0].path_data[0].commands[0]
    }

    #[test]
    fn test_offsets_apply_per_image() {
        let mut d = doc();
        let calibration = Calibration::from([(1, Offset::new(-3, 4))]);
        assert_eq!(apply_offsets(&mut d, &calibration), 1);
        assert_eq!(
            first_command(&d, 0),
            PathCommand::QuadBezierTo {
                x1: 10,
                y1: 10,
                x: 15,
                y: 20
            }
        );
        assert_eq!(
            first_command(&d, 1),
            PathCommand::QuadBezierTo {
                x1: 7,
                y1: 14,
                x: 12,
                y: 24
            }
        );
    }

    #[test]
    fn test_repeated_application_accumulates_and_inverse_restores() {
        let original = doc();
        let mut d = original.clone();
        let offset = Offset::new(2, -1);
        let calibration = Calibration::from([(0, offset)]);
        apply_offsets(&mut d, &calibration);
        apply_offsets(&mut d, &calibration);
        assert_eq!(
            first_command(&d, 0),
            PathCommand::QuadBezierTo {
                x1: 14,
                y1: 8,
                x: 19,
                y: 18
            }
        );
        let inverse = Calibration::from([(0, offset.inverse())]);
        apply_offsets(&mut d, &inverse);
        apply_offsets(&mut d, &inverse);
        assert_eq!(d, original);
    }

    #[test]
    fn test_parse_indexed_offset() {
        let parsed: IndexedOffset = "1:-25, 40".parse().unwrap();
        assert_eq!(parsed.index, 1);
        assert_eq!(parsed.offset, Offset::new(-25, 40));
        assert!("1:-25".parse::<IndexedOffset>().is_err());
        assert!("x:1,2".parse::<IndexedOffset>().is_err());
    }

    #[test]
    fn test_calibrate_file_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slide2_colored_regions.json");
        write_json(&path, &doc()).unwrap();

        let moved = calibrate_file(&path, &path, &Calibration::from([(0, Offset::new(1, 1))])).unwrap();
        assert_eq!(moved, 1);
        let back: RegionDocument = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            first_command(&back, 0),
            PathCommand::QuadBezierTo {
                x1: 11,
                y1: 11,
                x: 16,
                y: 21
            }
        );

        let original = std::fs::read(&path).unwrap();
        calibrate_file(&path, &path, &Calibration::from([(0, Offset::new(0, 0))])).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), original);

        let missing = dir.path().join("nope.json");
        assert!(matches!(
            calibrate_file(&missing, &missing, &Calibration::new()),
            Err(Error::NotFound(_))
        ));
    }
}
