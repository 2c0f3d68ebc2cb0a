//! Namespaces that matter when reading slide parts.

/// DrawingML main namespace (`a:` prefix).
pub const DRAWINGML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// PresentationML main namespace (`p:` prefix).
pub const PRESENTATIONML: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
/// Office document relationships namespace (`r:` prefix).
pub const OFFICE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Package relationships namespace used by `.rels` parts.
pub const PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
/// Markup compatibility namespace (`mc:` prefix).
pub const MARKUP_COMPATIBILITY: &str =
    "http://schemas.openxmlformats.org/markup-compatibility/2006";

/// A resolved XML namespace.
///
/// Prefixes are resolved against the in-scope `xmlns` declarations while the
/// tree is built, so queries never depend on which prefix a producer chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `a:` DrawingML
    DrawingML,
    /// `p:` PresentationML
    PresentationML,
    /// `r:` office relationships
    OfficeRelationships,
    /// Package relationships (`.rels` parts)
    PackageRelationships,
    /// `mc:` markup compatibility
    MarkupCompatibility,
    /// Any other declared namespace
    Other,
    /// No namespace (unprefixed attributes, undeclared elements)
    None,
}

impl Namespace {
    /// Map a namespace URI to its variant.
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            DRAWINGML => Namespace::DrawingML,
            PRESENTATIONML => Namespace::PresentationML,
            OFFICE_RELATIONSHIPS => Namespace::OfficeRelationships,
            PACKAGE_RELATIONSHIPS => Namespace::PackageRelationships,
            MARKUP_COMPATIBILITY => Namespace::MarkupCompatibility,
            _ => Namespace::Other,
        }
    }
}
