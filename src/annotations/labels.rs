//! White text labels.
//!
//! Pointer labels on the bone slides are set in white. Text in any other
//! color (or in the theme default) is decorative and not associated with
//! lines.
use crate::annotations::lines::ConnectorLine;
use crate::common::geometry::{BoundingBox, Point};
use crate::ooxml::drawings::Transform;
use crate::ooxml::opc::Relationships;
use crate::ooxml::pptx::{Hyperlink, Shape, ShapeType, Slide};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Unrotated shape box with its raw rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    /// Raw rotation (1/60000 degree)
    pub rotation: i64,
}

impl From<&Transform> for ShapeBox {
    fn from(t: &Transform) -> Self {
        Self {
            x: t.x,
            y: t.y,
            width: t.width,
            height: t.height,
            rotation: t.rotation,
        }
    }
}

impl ShapeBox {
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBox {
    #[serde(flatten)]
    pub shape_box: ShapeBox,
    pub shape_id: String,
}

/// A white text label and what it points at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnnotation {
    /// `annot_N`, numbered from 1 in document order
    pub annotation_id: String,
    pub bone_name: String,
    pub subbone_name: String,
    pub text_content: String,
    pub text_box: TextBox,
    pub has_hyperlink: bool,
    /// Written as `{}` when absent
    #[serde(serialize_with = "serialize_hyperlink")]
    pub hyperlink: Option<Hyperlink>,
    pub pointer_lines: Vec<ConnectorLine>,
    pub target_regions: Vec<Point>,
}

impl TextAnnotation {
    /// Label box in slide space.
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        self.text_box.shape_box.bounds()
    }
}

fn serialize_hyperlink<S: Serializer>(link: &Option<Hyperlink>, serializer: S) -> Result<S::Ok, S::Error> {
    match link {
        Some(link) => link.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Collect the white text labels of a slide, in document order.
///
/// A label is a `p:sp` with a text body, a transform, non-empty text and at
/// least one run filled white. Pointer lines and targets are left empty for
/// the associator.
pub fn extract_labels(slide: &Slide, rels: &Relationships, bone_set: &str) -> Vec<TextAnnotation> {
    slide
        .shapes_of(ShapeType::Shape)
        .filter_map(label_parts)
        .enumerate()
        .map(|(i, (shape, placement, text))| {
            let hyperlink = shape
                .hyperlink_r_id()
                .and_then(|r_id| Hyperlink::resolve(r_id, rels));
            debug!(shape_id = %shape.id, text = %text, linked = hyperlink.is_some(), "white label");
            TextAnnotation {
                annotation_id: format!("annot_{}", i + 1),
                bone_name: bone_set.to_string(),
                subbone_name: text.clone(),
                text_content: text,
                text_box: TextBox {
                    shape_box: ShapeBox::from(&placement),
                    shape_id: shape.id.clone(),
                },
                has_hyperlink: hyperlink.is_some(),
                hyperlink,
                pointer_lines: Vec::new(),
                target_regions: Vec::new(),
            }
        })
        .collect()
}

fn label_parts(shape: &Shape) -> Option<(&Shape, Transform, String)> {
    let frame = shape.text.as_ref()?;
    if !frame.has_white_run() {
        return None;
    }
    let placement = shape.placement?;
    let text = frame.text().trim().to_string();
    if text.is_empty() {
        return None;
    }
    Some((shape, placement, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type;

    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

    fn text_shape(id: u32, color: &str, text: &str, link: &str) -> String {
        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/></p:nvSpPr>
               <p:spPr><a:xfrm rot="120000"><a:off x="{id}00" y="50"/><a:ext cx="1000" cy="400"/></a:xfrm></p:spPr>
               <p:txBody><a:bodyPr/><a:p><a:r><a:rPr><a:solidFill>{color}</a:solidFill>{link}</a:rPr><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>"#
        )
    }

    fn slide(shapes: &[String]) -> Slide {
        let xml = format!(r#"<p:sld {NS}><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#, shapes.concat());
        Slide::from_bytes(3, xml.as_bytes()).unwrap()
    }

    fn rels() -> Relationships {
        let mut rels = Relationships::new();
        rels.add_relationship(relationship_type::SLIDE.into(), "slide12.xml".into(), "rId5".into(), false);
        rels
    }

    #[test]
    fn test_only_white_labels() {
        let white = r#"<a:srgbClr val="ffffff"/>"#;
        let slide = slide(&[
            text_shape(2, white, " Iliac crest ", r#"<a:hlinkClick r:id="rId5"/>"#),
            text_shape(3, r#"<a:srgbClr val="000000"/>"#, "Decoration", ""),
            text_shape(4, r#"<a:schemeClr val="lt1"/>"#, "Ischial spine", ""),
            text_shape(5, white, "   ", ""),
        ]);
        let labels = extract_labels(&slide, &rels(), "Bony Pelvis");

        assert_eq!(labels.len(), 2);
        let first = &labels[0];
        assert_eq!(first.annotation_id, "annot_1");
        assert_eq!(first.text_content, "Iliac crest");
        assert_eq!(first.subbone_name, "Iliac crest");
        assert_eq!(first.bone_name, "Bony Pelvis");
        assert_eq!(first.text_box.shape_id, "2");
        assert_eq!(first.text_box.shape_box.rotation, 120000);
        assert_eq!(first.bounds(), BoundingBox::new(200, 50, 1000, 400));
        assert!(first.has_hyperlink);
        assert_eq!(first.hyperlink.as_ref().unwrap().target_slide, Some(12));

        assert_eq!(labels[1].annotation_id, "annot_2");
        assert_eq!(labels[1].text_content, "Ischial spine");
        assert!(!labels[1].has_hyperlink);
    }

    #[test]
    fn test_label_json_shape() {
        let slide = slide(&[text_shape(4, r#"<a:schemeClr val="bg1"/>"#, "Pubic tubercle", "")]);
        let value = serde_json::to_value(&extract_labels(&slide, &rels(), "Bony Pelvis")[0]).unwrap();
        assert_eq!(value["hyperlink"], serde_json::json!({}));
        assert_eq!(value["text_box"]["x"], 400);
        assert_eq!(value["text_box"]["rotation"], 120000);
        assert_eq!(value["text_box"]["shape_id"], "4");
        assert_eq!(value["target_regions"], serde_json::json!([]));
    }

    #[test]
    fn test_unresolved_hyperlink_is_dropped() {
        let slide = slide(&[text_shape(2, r#"<a:srgbClr val="FFFFFF"/>"#, "Ilium", r#"<a:hlinkClick r:id="rId99"/>"#)]);
        let labels = extract_labels(&slide, &rels(), "Bony Pelvis");
        assert!(!labels[0].has_hyperlink);
        assert!(labels[0].hyperlink.is_none());
    }
}
