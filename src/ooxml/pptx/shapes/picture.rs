//! Picture (image) shape helpers.
use crate::common::geometry::BoundingBox;
use crate::common::xml::{Namespace, XmlElement};
use crate::ooxml::pptx::shapes::base::{Shape, ShapeType};

/// Get the relationship ID of the embedded image (`a:blip@r:embed`).
///
/// This rId can be used to locate the actual image file through the slide
/// relationships.
pub(crate) fn image_r_id(pic: &XmlElement) -> Option<String> {
    pic.find(Namespace::DrawingML, "blip")
        .and_then(|blip| blip.attr_ns(Namespace::OfficeRelationships, "embed"))
        .map(str::to_string)
}

/// A picture placed on a slide, as used for partitioning and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    /// `cNvPr@name`
    pub name: String,
    /// `cNvPr@id`
    pub shape_id: String,
    /// Slide-space box
    pub bounds: BoundingBox,
    /// Raw rotation (1/60000 degree)
    pub rotation: i64,
    pub flip_h: bool,
    pub flip_v: bool,
    /// Embedded image rId
    pub image: Option<String>,
}

impl Picture {
    /// View a picture shape. Returns `None` for other shape types and for
    /// pictures without a transform.
    pub fn from_shape(shape: &Shape) -> Option<Self> {
        if shape.shape_type != ShapeType::Picture {
            return None;
        }
        let placement = shape.placement?;
        Some(Self {
            name: shape.name.clone(),
            shape_id: shape.id.clone(),
            bounds: placement.bounds(),
            rotation: placement.rotation,
            flip_h: placement.flip_h,
            flip_v: placement.flip_v,
            image: shape.image.clone(),
        })
    }
}
