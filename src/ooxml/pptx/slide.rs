//! Slide parts (`ppt/slides/slideN.xml`).
use crate::common::xml::{Namespace, XmlElement};
use crate::common::{Error, Result};
use crate::ooxml::drawings::GroupFrame;
use crate::ooxml::pptx::shapes::{Picture, Shape, ShapeType};
use std::path::Path;
use tracing::trace;

/// A slide in a presentation.
///
/// Holds the slide number and the typed shapes of its shape tree in
/// document order, with group contents flattened into slide space.
///
/// # Examples
///
/// ```rust,no_run
/// use bonebox::ooxml::pptx::Slide;
///
/// let slide = Slide::open("deck/ppt/slides/slide2.xml")?;
/// println!("Slide {} has {} shapes", slide.number(), slide.shapes().len());
/// for picture in slide.pictures() {
///     println!("Picture: {}", picture.name);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Slide {
    number: u32,
    shapes: Vec<Shape>,
}

impl Slide {
    /// Read a slide part from disk.
    ///
    /// The slide number is taken from the `slideN.xml` file name (0 if the
    /// name does not follow that pattern).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_bytes(slide_number_from_path(path).unwrap_or(0), &bytes)
    }

    /// Parse slide markup.
    pub fn from_bytes(number: u32, xml: &[u8]) -> Result<Self> {
        let root = XmlElement::parse(xml)?;
        let tree = root
            .find_path(&[
                (Namespace::PresentationML, "cSld"),
                (Namespace::PresentationML, "spTree"),
            ])
            .ok_or_else(|| Error::Parse(format!("slide {number} has no shape tree")))?;

        let mut shapes = Vec::new();
        let mut frames = Vec::new();
        collect_shapes(tree, &mut frames, &mut shapes);
        trace!(slide = number, shapes = shapes.len(), "parsed slide");
        Ok(Self { number, shapes })
    }

    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// All shapes in document order.
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes of one type.
    pub fn shapes_of(&self, shape_type: ShapeType) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(move |s| s.shape_type == shape_type)
    }

    /// Pictures with a transform, in document order.
    pub fn pictures(&self) -> impl Iterator<Item = Picture> + '_ {
        self.shapes.iter().filter_map(Picture::from_shape)
    }

    /// Per-shape text (fragments trimmed and space-joined), in document order.
    ///
    /// Shapes without any text are left out.
    pub fn text_labels(&self) -> impl Iterator<Item = String> + '_ {
        self.shapes
            .iter()
            .filter_map(|s| s.text.as_ref())
            .map(|t| t.label_text())
            .filter(|t| !t.is_empty())
    }
}

/// Walk a shape tree, descending into groups and markup-compatibility blocks.
fn collect_shapes(tree: &XmlElement, frames: &mut Vec<GroupFrame>, out: &mut Vec<Shape>) {
    for child in tree.children() {
        match (child.namespace(), child.name()) {
            (Namespace::PresentationML, "grpSp") => {
                let frame = child
                    .find_path(&[
                        (Namespace::PresentationML, "grpSpPr"),
                        (Namespace::DrawingML, "xfrm"),
                    ])
                    .map(GroupFrame::from_element);
                if let Some(frame) = frame {
                    frames.push(frame);
                }
                collect_shapes(child, frames, out);
                if frame.is_some() {
                    frames.pop();
                }
            },
            (Namespace::MarkupCompatibility, "AlternateContent") => {
                if let Some(fallback) = child.child(Namespace::MarkupCompatibility, "Fallback") {
                    collect_shapes(fallback, frames, out);
                }
            },
            _ => {
                if let Some(shape) = Shape::from_element(child, frames) {
                    out.push(shape);
                }
            },
        }
    }
}

/// Extract `N` from a `slideN.xml` path.
///
/// # Examples
///
/// ```
/// use bonebox::ooxml::pptx::slide_number_from_path;
/// use std::path::Path;
///
/// assert_eq!(slide_number_from_path(Path::new("slides/slide14.xml")), Some(14));
/// assert_eq!(slide_number_from_path(Path::new("slides/slideLayout1.xml")), None);
/// ```
pub fn slide_number_from_path(path: &Path) -> Option<u32> {
    let name = path.file_name()?.to_str()?;
    let digits = name.strip_prefix("slide")?.strip_suffix(".xml")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006""#;

    fn slide_xml(tree: &str) -> String {
        format!(r#"<p:sld {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr><p:grpSpPr/>{tree}</p:spTree></p:cSld></p:sld>"#)
    }

    fn sp(id: u32, x: i64, text: &str) -> String {
        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Shape {id}"/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="0"/><a:ext cx="100" cy="100"/></a:xfrm></p:spPr><p:txBody><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>"#
        )
    }

    #[test]
    fn test_shapes_in_document_order() {
        let xml = slide_xml(&format!(
            r#"{}<p:pic><p:nvPicPr><p:cNvPr id="3" name="Picture 2"/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/></p:blipFill><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="5" cy="5"/></a:xfrm></p:spPr></p:pic>{}"#,
            sp(2, 10, "Ilium"),
            sp(4, 20, "")
        ));
        let slide = Slide::from_bytes(2, xml.as_bytes()).unwrap();
        let ids: Vec<_> = slide.shapes().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "4"]);
        assert_eq!(slide.pictures().count(), 1);
        assert_eq!(slide.shapes_of(ShapeType::Shape).count(), 2);
        assert_eq!(slide.text_labels().collect::<Vec<_>>(), ["Ilium"]);
    }

    #[test]
    fn test_group_children_are_mapped_to_slide_space() {
        let xml = slide_xml(&format!(
            r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="5" name="Group 4"/></p:nvGrpSpPr>
                <p:grpSpPr><a:xfrm><a:off x="1000" y="1000"/><a:ext cx="200" cy="200"/><a:chOff x="0" y="0"/><a:chExt cx="100" cy="100"/></a:xfrm></p:grpSpPr>
                {}</p:grpSp>"#,
            sp(6, 50, "Pubis")
        ));
        let slide = Slide::from_bytes(3, xml.as_bytes()).unwrap();
        assert_eq!(slide.shapes().len(), 1);
        let placement = slide.shapes()[0].placement.unwrap();
        assert_eq!((placement.x, placement.y), (1100, 1000));
        assert_eq!((placement.width, placement.height), (200, 200));
    }

    #[test]
    fn test_alternate_content_reads_fallback() {
        let xml = slide_xml(&format!(
            r#"<mc:AlternateContent><mc:Choice Requires="p14">{}</mc:Choice><mc:Fallback>{}</mc:Fallback></mc:AlternateContent>"#,
            sp(7, 0, "choice"),
            sp(8, 0, "fallback")
        ));
        let slide = Slide::from_bytes(4, xml.as_bytes()).unwrap();
        assert_eq!(slide.shapes().len(), 1);
        assert_eq!(slide.shapes()[0].id, "8");
    }

    #[test]
    fn test_missing_shape_tree_is_parse_error() {
        let xml = format!(r#"<p:sld {NS}><p:cSld/></p:sld>"#);
        assert!(matches!(
            Slide::from_bytes(1, xml.as_bytes()),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            Slide::from_bytes(1, b"<p:sld"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_open_reads_number_from_file_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slide12.xml");
        std::fs::write(&path, slide_xml(&sp(2, 0, "x"))).unwrap();
        let slide = Slide::open(&path).unwrap();
        assert_eq!(slide.number(), 12);
        assert!(matches!(
            Slide::open(dir.path().join("slide13.xml")),
            Err(Error::NotFound(_))
        ));
    }
}
