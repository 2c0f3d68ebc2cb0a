//! Custom geometry paths (`a:custGeom/a:pathLst/a:path`).
//!
//! A path is read into a [`RawPath`] in its own integer coordinate grid and
//! then decoded into [`PathCommand`]s placed in document space by the owning
//! shape's [`Transform`].
use crate::common::geometry::Point;
use crate::common::xml::{Namespace, XmlElement};
use crate::common::{Error, Result};
use crate::ooxml::drawings::xfrm::Transform;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// How a path-local coordinate is stretched onto the shape extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMode {
    /// `origin + round(c / ps * ts)`
    Rounded,
    /// `origin + floor(c * ts / ps)`, integer arithmetic only
    #[default]
    Truncated,
}

impl ScalingMode {
    /// Scale one coordinate along one axis.
    ///
    /// `path_size == 0` maps every coordinate onto `origin`. Returns `None`
    /// when the result does not fit in an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bonebox::ooxml::drawings::ScalingMode;
    ///
    /// assert_eq!(ScalingMode::Rounded.scale(1, 1000, 300, 2), Some(1150));
    /// assert_eq!(ScalingMode::Truncated.scale(1, 1000, 301, 2), Some(1150));
    /// assert_eq!(ScalingMode::Rounded.scale(7, 1000, 300, 0), Some(1000));
    /// assert_eq!(ScalingMode::Truncated.scale(1, i64::MAX, 2, 1), None);
    /// ```
    pub fn scale(self, coord: i64, origin: i64, target_size: i64, path_size: i64) -> Option<i64> {
        if path_size == 0 {
            return Some(origin);
        }
        let offset = match self {
            ScalingMode::Rounded => {
                let scaled = (coord as f64 / path_size as f64 * target_size as f64).round();
                // i64::MAX as f64 rounds up to 2^63
                if !(scaled >= i64::MIN as f64 && scaled < i64::MAX as f64) {
                    return None;
                }
                scaled as i64
            },
            ScalingMode::Truncated => {
                let product = coord as i128 * target_size as i128;
                i64::try_from(floor_div(product, path_size as i128)).ok()?
            },
        };
        origin.checked_add(offset)
    }
}

fn floor_div(a: i128, b: i128) -> i128 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Drawing command kinds in path markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    MoveTo,
    LineTo,
    CubicBezierTo,
    QuadBezierTo,
    Close,
}

impl SegmentKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "moveTo" => Some(SegmentKind::MoveTo),
            "lnTo" => Some(SegmentKind::LineTo),
            "cubicBezTo" => Some(SegmentKind::CubicBezierTo),
            "quadBezTo" => Some(SegmentKind::QuadBezierTo),
            "close" => Some(SegmentKind::Close),
            _ => None,
        }
    }

    /// Element name as it appears in markup.
    pub fn tag(self) -> &'static str {
        match self {
            SegmentKind::MoveTo => "moveTo",
            SegmentKind::LineTo => "lnTo",
            SegmentKind::CubicBezierTo => "cubicBezTo",
            SegmentKind::QuadBezierTo => "quadBezTo",
            SegmentKind::Close => "close",
        }
    }

    /// Number of `a:pt` children the command needs.
    pub fn required_points(self) -> usize {
        match self {
            SegmentKind::MoveTo | SegmentKind::LineTo => 1,
            SegmentKind::CubicBezierTo => 3,
            SegmentKind::QuadBezierTo => 2,
            SegmentKind::Close => 0,
        }
    }
}

/// One drawing command with its points still in path-local units.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment {
    pub kind: SegmentKind,
    pub points: SmallVec<[Point; 3]>,
}

/// A path in its own coordinate grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPath {
    pub width: i64,
    pub height: i64,
    pub segments: Vec<RawSegment>,
}

impl RawPath {
    /// Read an `a:path` element. Unknown child tags are skipped.
    pub fn from_element(path: &XmlElement) -> Self {
        let segments = path
            .children()
            .iter()
            .filter_map(|child| {
                let kind = (child.namespace() == Namespace::DrawingML)
                    .then(|| SegmentKind::from_tag(child.name()))
                    .flatten();
                if kind.is_none() {
                    trace!(tag = child.name(), "ignoring unknown path command");
                }
                let kind = kind?;
                let points = child
                    .children_named(Namespace::DrawingML, "pt")
                    .map(|pt| {
                        Point::new(pt.attr_i64("x").unwrap_or(0), pt.attr_i64("y").unwrap_or(0))
                    })
                    .collect();
                Some(RawSegment { kind, points })
            })
            .collect();

        Self {
            width: path.attr_i64("w").unwrap_or(0),
            height: path.attr_i64("h").unwrap_or(0),
            segments,
        }
    }

    /// Read every `a:path` under a `a:custGeom` element.
    pub fn list_from_geometry(cust_geom: &XmlElement) -> Vec<RawPath> {
        cust_geom
            .find_path(&[(Namespace::DrawingML, "pathLst")])
            .map(|lst| {
                lst.children_named(Namespace::DrawingML, "path")
                    .map(RawPath::from_element)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Decode into document-space commands.
    ///
    /// Commands with too few points or with coordinates that overflow are
    /// dropped and logged; the rest of the path is kept.
    pub fn decode(&self, placement: &Transform, mode: ScalingMode) -> ShapePath {
        let scale = |p: &Point| {
            Some((
                mode.scale(p.x, placement.x, placement.width, self.width)?,
                mode.scale(p.y, placement.y, placement.height, self.height)?,
            ))
        };

        let commands = self
            .segments
            .iter()
            .filter_map(|segment| match PathCommand::from_segment(segment, &scale) {
                Ok(command) => Some(command),
                Err(e) => {
                    debug!("dropping path command: {e}");
                    None
                },
            })
            .collect();

        ShapePath {
            path_width: self.width,
            path_height: self.height,
            commands,
        }
    }
}

/// A decoded drawing command.
///
/// Serialized with a `type` tag using the markup names `moveTo`, `lineTo`,
/// `cubicBezTo`, `quadBezTo` and `close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathCommand {
    #[serde(rename = "moveTo")]
    MoveTo { x: i64, y: i64 },
    #[serde(rename = "lineTo")]
    LineTo { x: i64, y: i64 },
    #[serde(rename = "cubicBezTo")]
    CubicBezierTo {
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        x: i64,
        y: i64,
    },
    #[serde(rename = "quadBezTo")]
    QuadBezierTo { x1: i64, y1: i64, x: i64, y: i64 },
    #[serde(rename = "close")]
    Close,
}

impl PathCommand {
    /// Build a command from a raw segment, mapping every point through `scale`.
    ///
    /// Fails with [`Error::MalformedPathCommand`] when the segment carries
    /// fewer points than its kind requires, and with
    /// [`Error::CoordinateOverflow`] when `scale` yields `None` for a point.
    /// Extra points are ignored.
    pub fn from_segment<F>(segment: &RawSegment, scale: F) -> Result<Self>
    where
        F: Fn(&Point) -> Option<(i64, i64)>,
    {
        let kind = segment.kind;
        let required = kind.required_points();
        if segment.points.len() < required {
            return Err(Error::MalformedPathCommand {
                command: kind.tag(),
                required,
                found: segment.points.len(),
            });
        }

        let pts = &segment.points;
        let scale = |p: &Point| scale(p).ok_or(Error::CoordinateOverflow { command: kind.tag() });
        Ok(match kind {
            SegmentKind::MoveTo => {
                let (x, y) = scale(&pts[0])?;
                PathCommand::MoveTo { x, y }
            },
            SegmentKind::LineTo => {
                let (x, y) = scale(&pts[0])?;
                PathCommand::LineTo { x, y }
            },
            SegmentKind::CubicBezierTo => {
                let (x1, y1) = scale(&pts[0])?;
                let (x2, y2) = scale(&pts[1])?;
                let (x, y) = scale(&pts[2])?;
                PathCommand::CubicBezierTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                }
            },
            SegmentKind::QuadBezierTo => {
                let (x1, y1) = scale(&pts[0])?;
                let (x, y) = scale(&pts[1])?;
                PathCommand::QuadBezierTo { x1, y1, x, y }
            },
            SegmentKind::Close => PathCommand::Close,
        })
    }

    /// Shift every coordinate field in place, saturating at the `i64` range.
    pub fn translate(&mut self, dx: i64, dy: i64) {
        match self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                *x = x.saturating_add(dx);
                *y = y.saturating_add(dy);
            },
            PathCommand::CubicBezierTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                *x1 = x1.saturating_add(dx);
                *x2 = x2.saturating_add(dx);
                *x = x.saturating_add(dx);
                *y1 = y1.saturating_add(dy);
                *y2 = y2.saturating_add(dy);
                *y = y.saturating_add(dy);
            },
            PathCommand::QuadBezierTo { x1, y1, x, y } => {
                *x1 = x1.saturating_add(dx);
                *x = x.saturating_add(dx);
                *y1 = y1.saturating_add(dy);
                *y = y.saturating_add(dy);
            },
            PathCommand::Close => {},
        }
    }

    /// All points carried by the command, control points first.
    pub fn points(&self) -> SmallVec<[Point; 3]> {
        match *self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                smallvec::smallvec![Point::new(x, y)]
            },
            PathCommand::CubicBezierTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => smallvec::smallvec![Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y)],
            PathCommand::QuadBezierTo { x1, y1, x, y } => {
                smallvec::smallvec![Point::new(x1, y1), Point::new(x, y)]
            },
            PathCommand::Close => SmallVec::new(),
        }
    }
}

/// A decoded path as written to region documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapePath {
    pub path_width: i64,
    pub path_height: i64,
    pub commands: Vec<PathCommand>,
}

impl ShapePath {
    /// Shift every command in place.
    pub fn translate(&mut self, dx: i64, dy: i64) {
        for command in &mut self.commands {
            command.translate(dx, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn path(xml: &str) -> RawPath {
        let doc = format!(
            r#"<a:path xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" {xml}</a:path>"#
        );
        RawPath::from_element(&XmlElement::parse(doc.as_bytes()).unwrap())
    }

    fn placement(x: i64, y: i64, width: i64, height: i64) -> Transform {
        Transform {
            x,
            y,
            width,
            height,
            ..Transform::ZERO
        }
    }

    #[test]
    fn test_decode_all_command_kinds() {
        let raw = path(
            r#"w="100" h="200">
                <a:moveTo><a:pt x="0" y="0"/></a:moveTo>
                <a:lnTo><a:pt x="50" y="100"/></a:lnTo>
                <a:cubicBezTo><a:pt x="10" y="20"/><a:pt x="30" y="40"/><a:pt x="100" y="200"/></a:cubicBezTo>
                <a:quadBezTo><a:pt x="25" y="50"/><a:pt x="75" y="150"/></a:quadBezTo>
                <a:close/>"#,
        );
        let decoded = raw.decode(&placement(1000, 2000, 1000, 1000), ScalingMode::Rounded);
        assert_eq!(decoded.path_width, 100);
        assert_eq!(decoded.path_height, 200);
        assert_eq!(
            decoded.commands,
            vec![
                PathCommand::MoveTo { x: 1000, y: 2000 },
                PathCommand::LineTo { x: 1500, y: 2500 },
                PathCommand::CubicBezierTo {
                    x1: 1100,
                    y1: 2100,
                    x2: 1300,
                    y2: 2200,
                    x: 2000,
                    y: 3000
                },
                PathCommand::QuadBezierTo {
                    x1: 1250,
                    y1: 2250,
                    x: 1750,
                    y: 2750
                },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_short_commands_are_dropped() {
        let raw = path(
            r#"w="10" h="10">
                <a:moveTo><a:pt x="1" y="1"/></a:moveTo>
                <a:cubicBezTo><a:pt x="1" y="1"/><a:pt x="2" y="2"/></a:cubicBezTo>
                <a:quadBezTo><a:pt x="3" y="3"/></a:quadBezTo>
                <a:lnTo/>
                <a:close/>"#,
        );
        let decoded = raw.decode(&placement(0, 0, 10, 10), ScalingMode::Truncated);
        assert_eq!(
            decoded.commands,
            vec![PathCommand::MoveTo { x: 1, y: 1 }, PathCommand::Close]
        );
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        let raw = path(
            r#"w="10" h="10"><a:arcTo wR="1" hR="1" stAng="0" swAng="0"/><a:moveTo><a:pt x="5" y="5"/></a:moveTo>"#,
        );
        assert_eq!(raw.segments.len(), 1);
        assert_eq!(raw.segments[0].kind, SegmentKind::MoveTo);
    }

    #[test]
    fn test_zero_path_size_collapses_onto_origin() {
        let raw = path(r#"w="0" h="50"><a:lnTo><a:pt x="40" y="25"/></a:lnTo>"#);
        let decoded = raw.decode(&placement(700, 900, 100, 100), ScalingMode::Rounded);
        assert_eq!(decoded.commands, vec![PathCommand::LineTo { x: 700, y: 950 }]);
    }

    #[test]
    fn test_overflowing_command_is_dropped() {
        let raw = path(
            r#"w="1" h="1"><a:moveTo><a:pt x="0" y="0"/></a:moveTo><a:lnTo><a:pt x="9223372036854775807" y="1"/></a:lnTo><a:lnTo><a:pt x="1" y="1"/></a:lnTo>"#,
        );
        let decoded = raw.decode(&placement(10, 10, 2, 2), ScalingMode::Truncated);
        assert_eq!(
            decoded.commands,
            vec![PathCommand::MoveTo { x: 10, y: 10 }, PathCommand::LineTo { x: 12, y: 12 }]
        );
        assert_eq!(ScalingMode::Rounded.scale(i64::MAX, 0, 4, 1), None);
        assert_eq!(ScalingMode::Truncated.scale(1, i64::MAX, 1, 1), None);

        let segment = RawSegment {
            kind: SegmentKind::LineTo,
            points: smallvec::smallvec![Point::new(0, 0)],
        };
        let err = PathCommand::from_segment(&segment, |_| None).unwrap_err();
        assert!(matches!(err, Error::CoordinateOverflow { command: "lnTo" }));
    }

    #[test]
    fn test_truncated_mode_floors() {
        // 1 * 5 / 3 = 1.67
        assert_eq!(ScalingMode::Truncated.scale(1, 0, 5, 3), Some(1));
        assert_eq!(ScalingMode::Rounded.scale(1, 0, 5, 3), Some(2));
        assert_eq!(ScalingMode::Truncated.scale(-1, 0, 5, 3), Some(-2));
    }

    #[test]
    fn test_malformed_error_reports_counts() {
        let segment = RawSegment {
            kind: SegmentKind::CubicBezierTo,
            points: smallvec::smallvec![Point::new(0, 0)],
        };
        let err = PathCommand::from_segment(&segment, |p| Some((p.x, p.y))).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedPathCommand {
                command: "cubicBezTo",
                required: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn test_translate_moves_every_field() {
        let mut cmd = PathCommand::CubicBezierTo {
            x1: 1,
            y1: 2,
            x2: 3,
            y2: 4,
            x: 5,
            y: 6,
        };
        cmd.translate(10, -1);
        assert_eq!(
            cmd.points().as_slice(),
            &[Point::new(11, 1), Point::new(13, 3), Point::new(15, 5)]
        );
        let mut close = PathCommand::Close;
        close.translate(5, 5);
        assert_eq!(close, PathCommand::Close);

        let mut edge = PathCommand::LineTo { x: i64::MAX - 1, y: i64::MIN + 1 };
        edge.translate(5, -5);
        assert_eq!(edge, PathCommand::LineTo { x: i64::MAX, y: i64::MIN });
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&PathCommand::QuadBezierTo {
            x1: 1,
            y1: 2,
            x: 3,
            y: 4,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"quadBezTo","x1":1,"y1":2,"x":3,"y":4}"#);
        assert_eq!(
            serde_json::to_string(&PathCommand::Close).unwrap(),
            r#"{"type":"close"}"#
        );
    }

    proptest! {
        #[test]
        fn prop_rounded_scaling_matches_formula(
            raw in 0i64..=100_000,
            path_size in 0i64..=100_000,
            shape_size in 0i64..=20_000_000,
            origin in -20_000_000i64..=20_000_000,
        ) {
            let got = ScalingMode::Rounded.scale(raw, origin, shape_size, path_size);
            if path_size == 0 {
                prop_assert_eq!(got, Some(origin));
            } else {
                let expected = origin + (raw as f64 / path_size as f64 * shape_size as f64).round() as i64;
                prop_assert_eq!(got, Some(expected));
            }
        }

        #[test]
        fn prop_truncated_scaling_is_integer_floor(
            raw in 0i64..=100_000,
            path_size in 1i64..=100_000,
            shape_size in 0i64..=20_000_000,
            origin in -20_000_000i64..=20_000_000,
        ) {
            let got = ScalingMode::Truncated.scale(raw, origin, shape_size, path_size);
            prop_assert_eq!(got, Some(origin + raw * shape_size / path_size));
        }
    }
}
