//! Base shape types for slides.
use crate::common::xml::{Namespace, XmlElement};
use crate::ooxml::drawings::{Fill, GroupFrame, RawPath, Transform};
use crate::ooxml::pptx::shapes::connector::LineStyle;
use crate::ooxml::pptx::shapes::picture::image_r_id;
use crate::ooxml::pptx::shapes::textframe::TextFrame;

/// Shape type enumeration.
///
/// Indicates what kind of shape this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    /// An autoshape, freeform or text box (p:sp)
    Shape,
    /// A picture shape (p:pic)
    Picture,
    /// A connector shape (p:cxnSp)
    Connector,
}

impl ShapeType {
    fn from_element(element: &XmlElement) -> Option<Self> {
        if element.namespace() != Namespace::PresentationML {
            return None;
        }
        match element.name() {
            "sp" => Some(ShapeType::Shape),
            "pic" => Some(ShapeType::Picture),
            "cxnSp" => Some(ShapeType::Connector),
            _ => None,
        }
    }
}

/// A drawable shape with everything extraction reads from it.
///
/// `placement` is already mapped through enclosing group frames, so it is in
/// slide space.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// `cNvPr@id`, empty when absent
    pub id: String,
    /// `cNvPr@name`
    pub name: String,
    pub shape_type: ShapeType,
    /// `spPr/a:xfrm`; `None` when the shape declares no transform
    pub placement: Option<Transform>,
    /// Shape fill from `spPr`
    pub fill: Option<Fill>,
    /// Outline from `spPr/a:ln`
    pub line: Option<LineStyle>,
    /// Paths of `spPr/a:custGeom`
    pub paths: Vec<RawPath>,
    pub text: Option<TextFrame>,
    /// `cNvPr/a:hlinkClick@r:id`
    pub hyperlink: Option<String>,
    /// `blipFill/a:blip@r:embed` of pictures
    pub image: Option<String>,
}

impl Shape {
    /// Build a shape from a `p:sp`, `p:pic` or `p:cxnSp` element.
    ///
    /// `frames` are the enclosing group frames, outermost first. Returns
    /// `None` for any other element.
    pub fn from_element(element: &XmlElement, frames: &[GroupFrame]) -> Option<Self> {
        let shape_type = ShapeType::from_element(element)?;
        let c_nv_pr = non_visual_props(element);
        let sp_pr = element.child(Namespace::PresentationML, "spPr");

        let placement = sp_pr
            .and_then(|p| p.child(Namespace::DrawingML, "xfrm"))
            .map(Transform::from_element)
            .map(|t| frames.iter().rev().fold(t, |t, frame| frame.map(t)));

        Some(Self {
            id: c_nv_pr
                .and_then(|c| c.attr("id"))
                .unwrap_or_default()
                .to_string(),
            name: c_nv_pr
                .and_then(|c| c.attr("name"))
                .unwrap_or_default()
                .to_string(),
            shape_type,
            placement,
            fill: sp_pr.and_then(Fill::from_properties),
            line: sp_pr
                .and_then(|p| p.child(Namespace::DrawingML, "ln"))
                .map(LineStyle::from_element),
            paths: sp_pr
                .and_then(|p| p.child(Namespace::DrawingML, "custGeom"))
                .map(RawPath::list_from_geometry)
                .unwrap_or_default(),
            text: element
                .child(Namespace::PresentationML, "txBody")
                .map(TextFrame::from_element),
            hyperlink: c_nv_pr
                .and_then(|c| c.child(Namespace::DrawingML, "hlinkClick"))
                .and_then(|h| h.attr_ns(Namespace::OfficeRelationships, "id"))
                .map(str::to_string),
            image: match shape_type {
                ShapeType::Picture => image_r_id(element),
                _ => None,
            },
        })
    }

    /// Shape-level hyperlink first, then the first run-level one.
    pub fn hyperlink_r_id(&self) -> Option<&str> {
        self.hyperlink
            .as_deref()
            .or_else(|| self.text.as_ref().and_then(TextFrame::first_hyperlink))
    }
}

/// `p:cNvPr` under whichever `p:nv*Pr` the shape carries.
fn non_visual_props(element: &XmlElement) -> Option<&XmlElement> {
    element
        .children()
        .iter()
        .filter(|c| c.namespace() == Namespace::PresentationML && c.name().starts_with("nv"))
        .find_map(|nv| nv.child(Namespace::PresentationML, "cNvPr"))
}
