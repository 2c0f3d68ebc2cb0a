//! White pointer lines.
use crate::annotations::labels::ShapeBox;
use crate::common::geometry::Point;
use crate::ooxml::pptx::{Shape, ShapeType, Slide};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// `p:cxnSp`
    Connector,
    /// Stroked `p:sp` without text
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineStyleSummary {
    pub width: i64,
    pub arrow_head: String,
}

/// A straight white line that may lead from a label to its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorLine {
    /// `line_N`, numbered from 1
    pub line_id: String,
    pub kind: LineKind,
    pub start_point: Point,
    pub end_point: Point,
    pub style: LineStyleSummary,
    pub shape_id: String,
    pub bbox: ShapeBox,
}

impl ConnectorLine {
    /// Numeric shape id, 0 when not numeric.
    pub fn numeric_shape_id(&self) -> i64 {
        self.shape_id.parse().unwrap_or(0)
    }

    /// Numeric part of `line_N`.
    pub fn ordinal(&self) -> usize {
        self.line_id
            .strip_prefix("line_")
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }
}

/// Collect the white lines of a slide.
///
/// Connectors come first in document order, then stroked shapes without a
/// text body. Lines without a transform are skipped.
pub fn extract_lines(slide: &Slide) -> Vec<ConnectorLine> {
    let connectors = slide
        .shapes_of(ShapeType::Connector)
        .map(|shape| (shape, LineKind::Connector));
    let strokes = slide
        .shapes_of(ShapeType::Shape)
        .filter(|shape| shape.text.is_none() && shape.line.is_some())
        .map(|shape| (shape, LineKind::Line));

    let mut lines = Vec::new();
    for (shape, kind) in connectors.chain(strokes) {
        if let Some(line) = white_line(shape, kind, lines.len() + 1) {
            lines.push(line);
        }
    }
    lines
}

fn white_line(shape: &Shape, kind: LineKind, ordinal: usize) -> Option<ConnectorLine> {
    let style = shape.line.as_ref().filter(|style| style.is_white())?;
    let placement = shape.placement?;
    let (start_point, end_point) = placement.endpoints();
    debug!(shape_id = %shape.id, ?kind, ?start_point, ?end_point, "white line");
    Some(ConnectorLine {
        line_id: format!("line_{ordinal}"),
        kind,
        start_point,
        end_point,
        style: LineStyleSummary {
            width: style.width,
            arrow_head: style.arrow_head().to_string(),
        },
        shape_id: shape.id.clone(),
        bbox: ShapeBox::from(&placement),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

    fn slide(shapes: &str) -> Slide {
        let xml = format!(r#"<p:sld {NS}><p:cSld><p:spTree>{shapes}</p:spTree></p:cSld></p:sld>"#);
        Slide::from_bytes(2, xml.as_bytes()).unwrap()
    }

    const WHITE_LN: &str = r#"<a:ln w="12700"><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill><a:headEnd type="arrow"/></a:ln>"#;

    #[test]
    fn test_connectors_then_lines() {
        let slide = slide(&format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="7" name="Line 6"/></p:nvSpPr>
                 <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="0"/></a:xfrm>{WHITE_LN}</p:spPr></p:sp>
               <p:cxnSp><p:nvCxnSpPr><p:cNvPr id="9" name="Connector 8"/></p:nvCxnSpPr>
                 <p:spPr><a:xfrm flipV="1"><a:off x="1000" y="1000"/><a:ext cx="200" cy="100"/></a:xfrm>{WHITE_LN}</p:spPr></p:cxnSp>
               <p:cxnSp><p:nvCxnSpPr><p:cNvPr id="10" name="Connector 9"/></p:nvCxnSpPr>
                 <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="1" cy="1"/></a:xfrm>
                 <a:ln><a:solidFill><a:srgbClr val="000000"/></a:solidFill></a:ln></p:spPr></p:cxnSp>"#
        ));
        let lines = extract_lines(&slide);
        assert_eq!(lines.len(), 2);

        let connector = &lines[0];
        assert_eq!(connector.line_id, "line_1");
        assert_eq!(connector.ordinal(), 1);
        assert_eq!(connector.kind, LineKind::Connector);
        assert_eq!(connector.shape_id, "9");
        // flipped vertically: bottom-left to top-right
        assert_eq!(connector.start_point, Point::new(1000, 1100));
        assert_eq!(connector.end_point, Point::new(1200, 1000));
        assert_eq!(connector.style.arrow_head, "arrow");

        let line = &lines[1];
        assert_eq!(line.line_id, "line_2");
        assert_eq!(line.kind, LineKind::Line);
        assert_eq!(line.numeric_shape_id(), 7);
        assert_eq!(line.start_point, Point::new(0, 0));
        assert_eq!(line.end_point, Point::new(100, 0));
    }

    #[test]
    fn test_line_json_shape() {
        let slide = slide(&format!(
            r#"<p:cxnSp><p:nvCxnSpPr><p:cNvPr id="3" name="c"/></p:nvCxnSpPr>
                 <p:spPr><a:xfrm rot="5400000"><a:off x="0" y="0"/><a:ext cx="200" cy="0"/></a:xfrm>{WHITE_LN}</p:spPr></p:cxnSp>"#
        ));
        let value = serde_json::to_value(&extract_lines(&slide)[0]).unwrap();
        assert_eq!(value["kind"], "connector");
        assert_eq!(value["style"]["width"], 12700);
        assert_eq!(value["bbox"]["rotation"], 5400000);
        // rotated a quarter turn about (100, 0)
        assert_eq!(value["start_point"], serde_json::json!({"x": 100, "y": -100}));
        assert_eq!(value["end_point"], serde_json::json!({"x": 100, "y": 100}));
    }
}
