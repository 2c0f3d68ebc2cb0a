//! Color references and fills.
//!
//! Only what classification and white-text detection need is modelled: theme
//! colors are kept by name and never resolved against a theme part.
use crate::common::style::RGBColor;
use crate::common::xml::{Namespace, XmlElement};

/// Theme color names rendered as white on the source decks.
const WHITE_SCHEME_COLORS: [&str; 2] = ["lt1", "bg1"];

/// A color choice inside a fill element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorRef {
    /// `a:srgbClr@val`. `None` when the value is not six hex digits.
    Rgb(Option<RGBColor>),
    /// `a:schemeClr@val`
    Scheme(String),
    /// `a:sysClr` with its cached `lastClr`
    System { name: String, last: Option<RGBColor> },
    /// Preset or other color kinds
    Other,
}

impl ColorRef {
    /// First color child of a fill-like element (`a:solidFill`, `a:gs`, ...).
    pub fn first_in(parent: &XmlElement) -> Option<ColorRef> {
        parent
            .children()
            .iter()
            .filter(|c| c.namespace() == Namespace::DrawingML)
            .find_map(|c| match c.name() {
                "srgbClr" => Some(ColorRef::Rgb(c.attr("val").and_then(RGBColor::from_hex))),
                "schemeClr" => Some(ColorRef::Scheme(c.attr("val").unwrap_or_default().to_string())),
                "sysClr" => Some(ColorRef::System {
                    name: c.attr("val").unwrap_or_default().to_string(),
                    last: c.attr("lastClr").and_then(RGBColor::from_hex),
                }),
                "prstClr" | "scrgbClr" | "hslClr" => Some(ColorRef::Other),
                _ => None,
            })
    }

    /// Exact `FFFFFF` or the light-1 / background-1 theme slots.
    pub fn is_white(&self) -> bool {
        match self {
            ColorRef::Rgb(rgb) => *rgb == Some(RGBColor::WHITE),
            ColorRef::Scheme(name) => WHITE_SCHEME_COLORS.contains(&name.as_str()),
            _ => false,
        }
    }
}

/// Shape or line fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fill {
    Solid(ColorRef),
    /// Gradient stop colors in document order.
    Gradient(Vec<ColorRef>),
    None,
}

impl Fill {
    /// Read the fill declared directly under a properties element
    /// (`p:spPr`, `a:ln`, `a:rPr`).
    pub fn from_properties(props: &XmlElement) -> Option<Fill> {
        props
            .children()
            .iter()
            .filter(|c| c.namespace() == Namespace::DrawingML)
            .find_map(|c| match c.name() {
                "solidFill" => ColorRef::first_in(c).map(Fill::Solid),
                "gradFill" => Some(Fill::Gradient(
                    c.find_all(Namespace::DrawingML, "gs")
                        .filter_map(ColorRef::first_in)
                        .collect(),
                )),
                "noFill" => Some(Fill::None),
                _ => None,
            })
    }

    /// The RGB value used for classification.
    ///
    /// Solid `srgbClr` first, then a solid `sysClr`'s `lastClr`, then the
    /// first gradient stop when it is an `srgbClr`.
    pub fn resolved_rgb(&self) -> Option<RGBColor> {
        match self {
            Fill::Solid(ColorRef::Rgb(rgb)) => *rgb,
            Fill::Solid(ColorRef::System { last, .. }) => *last,
            Fill::Gradient(stops) => match stops.first() {
                Some(ColorRef::Rgb(rgb)) => *rgb,
                _ => None,
            },
            _ => None,
        }
    }

    /// Solid white fill.
    pub fn is_white(&self) -> bool {
        matches!(self, Fill::Solid(color) if color.is_white())
    }
}
