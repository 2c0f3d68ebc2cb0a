//! Owned XML element tree.
//!
//! Built from quick-xml events with an explicit element stack, then queried by
//! [`Namespace`] + local name. Text is kept per element; entity references are
//! resolved while building.

use crate::common::xml::entity::resolve_entity;
use crate::common::xml::namespace::Namespace;
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// An attribute with its namespace resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    pub namespace: Namespace,
    pub name: String,
    pub value: String,
}

/// An element node with its attributes, own text and children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    namespace: Namespace,
    name: String,
    attributes: SmallVec<[XmlAttribute; 4]>,
    text: String,
    children: Vec<XmlElement>,
}

/// In-scope prefix declarations for one open element.
type Scope = SmallVec<[(String, Namespace); 2]>;

impl XmlElement {
    /// Parse a complete XML document and return its root element.
    ///
    /// Fails with [`Error::Parse`] when the input is not well-formed or has no
    /// root element.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut scopes: Vec<Scope> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let element = Self::open(e, &mut scopes)?;
                    stack.push(element);
                },
                Ok(Event::Empty(ref e)) => {
                    let element = Self::open(e, &mut scopes)?;
                    scopes.pop();
                    Self::attach(element, &mut stack, &mut root);
                },
                Ok(Event::End(_)) => {
                    scopes.pop();
                    if let Some(element) = stack.pop() {
                        Self::attach(element, &mut stack, &mut root);
                    }
                },
                Ok(Event::Text(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(std::str::from_utf8(t.as_ref())?);
                    }
                },
                Ok(Event::CData(ref t)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(std::str::from_utf8(t.as_ref())?);
                    }
                },
                Ok(Event::GeneralRef(ref r)) => {
                    if let Some(current) = stack.last_mut() {
                        let name = std::str::from_utf8(&**r)?;
                        match resolve_entity(name) {
                            Some(ch) => current.text.push(ch),
                            None => {
                                current.text.push('&');
                                current.text.push_str(name);
                                current.text.push(';');
                            },
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Parse(format!(
                        "XML error at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(Error::Parse(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| Error::Parse("no root element found".to_string()))
    }

    /// Create an element from a start tag, pushing its namespace scope.
    fn open(e: &BytesStart<'_>, scopes: &mut Vec<Scope>) -> Result<Self> {
        let mut scope = Scope::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            let prefix = if key == b"xmlns" {
                Some(String::new())
            } else {
                key.strip_prefix(b"xmlns:")
                    .map(|p| String::from_utf8_lossy(p).into_owned())
            };
            if let Some(prefix) = prefix {
                let uri = attr.unescape_value()?;
                scope.push((prefix, Namespace::from_uri(&uri)));
            }
        }
        scopes.push(scope);

        let name = e.name();
        let namespace = match name.prefix() {
            Some(prefix) => Self::resolve_prefix(scopes, std::str::from_utf8(prefix.as_ref())?),
            None => Self::resolve_prefix(scopes, ""),
        };

        let mut attributes = SmallVec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let namespace = match attr.key.prefix() {
                Some(prefix) => Self::resolve_prefix(scopes, std::str::from_utf8(prefix.as_ref())?),
                None => Namespace::None,
            };
            attributes.push(XmlAttribute {
                namespace,
                name: std::str::from_utf8(attr.key.local_name().as_ref())?.to_string(),
                value: attr.unescape_value()?.into_owned(),
            });
        }

        Ok(Self {
            namespace,
            name: std::str::from_utf8(e.local_name().as_ref())?.to_string(),
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn resolve_prefix(scopes: &[Scope], prefix: &str) -> Namespace {
        scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| *ns)
            .unwrap_or(Namespace::None)
    }

    fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => {
                if root.is_none() {
                    *root = Some(element);
                }
            },
        }
    }

    /// Local name without prefix.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Whether this element is `{ns}name`.
    #[inline]
    pub fn is(&self, ns: Namespace, name: &str) -> bool {
        self.namespace == ns && self.name == name
    }

    /// Own text content (not including children).
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Value of an unqualified attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attr_ns(Namespace::None, name)
    }

    /// Value of a namespace-qualified attribute, e.g. `r:embed`.
    pub fn attr_ns(&self, ns: Namespace, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace == ns && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Integer attribute. Decimal values are rounded to the nearest integer.
    pub fn attr_i64(&self, name: &str) -> Option<i64> {
        let raw = self.attr(name)?.trim();
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.round() as i64))
    }

    /// Boolean attribute (`1`/`true` or `0`/`false`).
    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        match self.attr(name)? {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }

    #[inline]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First direct child named `{ns}name`.
    pub fn child(&self, ns: Namespace, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(ns, name))
    }

    /// All direct children named `{ns}name`.
    pub fn children_named<'a>(
        &'a self,
        ns: Namespace,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(ns, name))
    }

    /// Follow a chain of direct children.
    pub fn find_path(&self, path: &[(Namespace, &str)]) -> Option<&XmlElement> {
        path.iter()
            .try_fold(self, |node, (ns, name)| node.child(*ns, name))
    }

    /// All descendants (excluding `self`) in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// First descendant named `{ns}name`.
    pub fn find(&self, ns: Namespace, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.is(ns, name))
    }

    /// All descendants named `{ns}name`, in document order.
    pub fn find_all<'a>(
        &'a self,
        ns: Namespace,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants().filter(move |e| e.is(ns, name))
    }
}

/// Pre-order iterator over an element's descendants.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, XmlElement>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    self.stack.push(node.children.iter());
                    return Some(node);
                },
                None => {
                    self.stack.pop();
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
       xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:cSld><p:spTree>
    <p:sp><p:nvSpPr><p:cNvPr id="4" name="Freeform 3"/></p:nvSpPr>
      <p:txBody><a:p><a:r><a:t>Ilium &amp; Ischium</a:t></a:r></a:p></p:txBody>
    </p:sp>
    <p:pic><p:blipFill><a:blip r:embed="rId2"/></p:blipFill></p:pic>
  </p:spTree></p:cSld>
</p:sld>"#;

    #[test]
    fn test_parse_resolves_namespaces() {
        let root = XmlElement::parse(SAMPLE.as_bytes()).unwrap();
        assert!(root.is(Namespace::PresentationML, "sld"));
        let tree = root
            .find_path(&[
                (Namespace::PresentationML, "cSld"),
                (Namespace::PresentationML, "spTree"),
            ])
            .unwrap();
        assert_eq!(tree.children().len(), 2);
        let blip = root.find(Namespace::DrawingML, "blip").unwrap();
        assert_eq!(blip.attr_ns(Namespace::OfficeRelationships, "embed"), Some("rId2"));
        assert_eq!(blip.attr("embed"), None);
    }

    #[test]
    fn test_entities_are_resolved_in_text() {
        let root = XmlElement::parse(SAMPLE.as_bytes()).unwrap();
        let t = root.find(Namespace::DrawingML, "t").unwrap();
        assert_eq!(t.text(), "Ilium & Ischium");
    }

    #[test]
    fn test_prefix_choice_does_not_matter() {
        let xml = r#"<x:sld xmlns:x="http://schemas.openxmlformats.org/presentationml/2006/main"><x:sp/></x:sld>"#;
        let root = XmlElement::parse(xml.as_bytes()).unwrap();
        assert_eq!(root.find_all(Namespace::PresentationML, "sp").count(), 1);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let xml = "<r><a><b/></a><c/></r>";
        let root = XmlElement::parse(xml.as_bytes()).unwrap();
        let names: Vec<_> = root.descendants().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(root.find(Namespace::None, "c").map(|e| e.name()), Some("c"));
    }

    #[test]
    fn test_numeric_and_bool_attributes() {
        let xml = r#"<xfrm rot="5400000" flipH="1" flipV="false" x="12.6" y="abc"/>"#;
        let root = XmlElement::parse(xml.as_bytes()).unwrap();
        assert_eq!(root.attr_i64("rot"), Some(5_400_000));
        assert_eq!(root.attr_i64("x"), Some(13));
        assert_eq!(root.attr_i64("y"), None);
        assert_eq!(root.attr_bool("flipH"), Some(true));
        assert_eq!(root.attr_bool("flipV"), Some(false));
    }

    #[test]
    fn test_malformed_input_is_parse_error() {
        assert!(matches!(XmlElement::parse(b""), Err(Error::Parse(_))));
        assert!(matches!(XmlElement::parse(b"<a><b></a>"), Err(Error::Parse(_))));
        assert!(matches!(XmlElement::parse(b"<a><b>"), Err(Error::Parse(_))));
    }
}
