//! Text bodies (`p:txBody`) of slide shapes.
use crate::common::xml::{Namespace, XmlElement};
use crate::ooxml::drawings::Fill;

/// Character properties of one text run (`a:rPr`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProperties {
    /// Run-level fill (`a:rPr/a:solidFill`, ...)
    pub fill: Option<Fill>,
    /// `a:rPr/a:hlinkClick@r:id`
    pub hyperlink: Option<String>,
}

impl RunProperties {
    fn from_element(rpr: &XmlElement) -> Self {
        Self {
            fill: Fill::from_properties(rpr),
            hyperlink: rpr
                .child(Namespace::DrawingML, "hlinkClick")
                .and_then(|h| h.attr_ns(Namespace::OfficeRelationships, "id"))
                .map(str::to_string),
        }
    }
}

/// A text frame containing text content.
///
/// Holds the concatenated `a:t` text and the properties of every run in
/// document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFrame {
    /// Every `a:t` fragment, in document order
    fragments: Vec<String>,
    /// Every `a:rPr`, in document order
    runs: Vec<RunProperties>,
}

impl TextFrame {
    /// Read a `p:txBody` element.
    pub fn from_element(tx_body: &XmlElement) -> Self {
        let mut frame = Self::default();
        for node in tx_body.descendants() {
            if node.namespace() != Namespace::DrawingML {
                continue;
            }
            match node.name() {
                "t" => frame.fragments.push(node.text().to_string()),
                "rPr" => frame.runs.push(RunProperties::from_element(node)),
                _ => {},
            }
        }
        frame
    }

    /// All text fragments concatenated.
    pub fn text(&self) -> String {
        self.fragments.concat()
    }

    /// Fragments trimmed individually and joined with single spaces.
    ///
    /// Empty fragments are left out.
    pub fn label_text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[inline]
    pub fn runs(&self) -> &[RunProperties] {
        &self.runs
    }

    /// Whether any run is filled white.
    pub fn has_white_run(&self) -> bool {
        self.runs
            .iter()
            .any(|r| r.fill.as_ref().is_some_and(Fill::is_white))
    }

    /// First run-level hyperlink rId.
    pub fn first_hyperlink(&self) -> Option<&str> {
        self.runs.iter().find_map(|r| r.hyperlink.as_deref())
    }
}
