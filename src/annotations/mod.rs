//! Text annotations: white labels, the lines leading away from them and the
//! points those lines end at.
pub mod associate;
pub mod labels;
pub mod lines;

pub use associate::{
    Association, AssociationMode, AssociationSettings, GraphAssociator, JunctionGraph,
    LabelAssociator, NearestAssociator,
};
pub use labels::{ShapeBox, TextAnnotation, TextBox, extract_labels};
pub use lines::{ConnectorLine, LineKind, extract_lines};

use crate::common::geometry::BoundingBox;
use crate::ooxml::opc::Relationships;
use crate::ooxml::pptx::Slide;
use serde::Serialize;
use tracing::debug;

/// Parameters recorded alongside the annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationConfig {
    pub association: AssociationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_emu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_emu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
}

impl From<&AssociationSettings> for AnnotationConfig {
    fn from(settings: &AssociationSettings) -> Self {
        match settings.mode {
            AssociationMode::Graph => Self {
                association: settings.mode,
                padding_emu: Some(settings.padding),
                snap_emu: Some(settings.snap.max(1)),
                k: None,
            },
            AssociationMode::Nearest => Self {
                association: settings.mode,
                padding_emu: None,
                snap_emu: None,
                k: Some(settings.nearest_k),
            },
        }
    }
}

/// `slideN_text_annotations.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnnotationDocument {
    pub slide_number: u32,
    pub text_annotations: Vec<TextAnnotation>,
    pub total_text_annotations: usize,
    pub config: AnnotationConfig,
}

/// Extracts labels and lines from a slide and associates them.
pub struct AnnotationExtractor {
    bone_set: String,
    settings: AssociationSettings,
    associator: Box<dyn LabelAssociator>,
}

impl AnnotationExtractor {
    pub fn new(bone_set: impl Into<String>, settings: AssociationSettings) -> Self {
        Self {
            bone_set: bone_set.into(),
            associator: settings.associator(),
            settings,
        }
    }

    pub fn extract(&self, slide: &Slide, rels: &Relationships) -> TextAnnotationDocument {
        let mut labels = extract_labels(slide, rels, &self.bone_set);
        let lines = extract_lines(slide);
        let boxes: Vec<BoundingBox> = labels.iter().map(TextAnnotation::bounds).collect();

        for (label, found) in labels
            .iter_mut()
            .zip(self.associator.associate(&boxes, &lines))
        {
            label.pointer_lines = found.pointer_lines;
            label.target_regions = found.target_regions;
        }
        debug!(
            slide = slide.number(),
            labels = labels.len(),
            lines = lines.len(),
            "associated labels"
        );

        TextAnnotationDocument {
            slide_number: slide.number(),
            total_text_annotations: labels.len(),
            text_annotations: labels,
            config: AnnotationConfig::from(&self.settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::geometry::Point;

    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
    const WHITE: &str = r#"<a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill>"#;

    fn slide() -> Slide {
        let xml = format!(
            r#"<p:sld {NS}><p:cSld><p:spTree>
               <p:sp><p:nvSpPr><p:cNvPr id="2" name="TextBox 1"/></p:nvSpPr>
                 <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="1000" cy="400"/></a:xfrm></p:spPr>
                 <p:txBody><a:p><a:r><a:rPr>{WHITE}</a:rPr><a:t>Ischial tuberosity</a:t></a:r></a:p></p:txBody></p:sp>
               <p:cxnSp><p:nvCxnSpPr><p:cNvPr id="3" name="Connector 2"/></p:nvCxnSpPr>
                 <p:spPr><a:xfrm><a:off x="1000" y="200"/><a:ext cx="40000" cy="0"/></a:xfrm><a:ln w="9525">{WHITE}</a:ln></p:spPr></p:cxnSp>
               </p:spTree></p:cSld></p:sld>"#
        );
        Slide::from_bytes(4, xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_graph_document() {
        let extractor = AnnotationExtractor::new("Bony Pelvis", AssociationSettings::default());
        let doc = extractor.extract(&slide(), &Relationships::new());
        assert_eq!(doc.slide_number, 4);
        assert_eq!(doc.total_text_annotations, 1);
        let label = &doc.text_annotations[0];
        assert_eq!(label.pointer_lines.len(), 1);
        assert_eq!(label.target_regions, [Point::new(40000, 0)]);

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value["config"],
            serde_json::json!({"association": "graph", "padding_emu": 4000, "snap_emu": 8000})
        );
    }

    #[test]
    fn test_nearest_document() {
        let settings = AssociationSettings {
            mode: AssociationMode::Nearest,
            ..AssociationSettings::default()
        };
        let doc = AnnotationExtractor::new("Bony Pelvis", settings).extract(&slide(), &Relationships::new());
        assert_eq!(doc.text_annotations[0].target_regions, [Point::new(41000, 200)]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["config"], serde_json::json!({"association": "nearest", "k": 2}));
    }
}
