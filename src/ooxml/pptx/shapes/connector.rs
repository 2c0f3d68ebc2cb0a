//! Line properties (`a:ln`) of connectors and stroked shapes.
use crate::common::xml::{Namespace, XmlElement};
use crate::ooxml::drawings::Fill;

/// Stroke of a shape outline or connector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStyle {
    /// Stroke width in EMU (`a:ln@w`, 0 when absent)
    pub width: i64,
    /// Stroke fill
    pub fill: Option<Fill>,
    /// `a:headEnd@type`, when a head end is declared
    pub head_end: Option<String>,
}

impl LineStyle {
    /// Read an `a:ln` element.
    pub fn from_element(ln: &XmlElement) -> Self {
        Self {
            width: ln.attr_i64("w").unwrap_or(0),
            fill: Fill::from_properties(ln),
            head_end: ln
                .child(Namespace::DrawingML, "headEnd")
                .map(|h| h.attr("type").unwrap_or("none").to_string()),
        }
    }

    /// Stroked solid white.
    pub fn is_white(&self) -> bool {
        self.fill.as_ref().is_some_and(Fill::is_white)
    }

    /// Arrow head style, `none` when not declared.
    pub fn arrow_head(&self) -> &str {
        self.head_end.as_deref().unwrap_or("none")
    }
}
