//! Constant values related to the Open Packaging Convention.
//!
//! Only the relationship vocabulary needed to read slide `.rels` parts is kept.

/// Substrings of relationship type URIs.
///
/// Producers differ in the exact URI (transitional vs. strict schemas), so
/// relationship types are matched by fragment rather than by equality.
pub mod relationship_type {
    /// Hyperlink relationships (`.../relationships/hyperlink`)
    pub const HYPERLINK_FRAGMENT: &str = "hyperlink";
    /// Slide-to-slide relationships (`.../relationships/slide`)
    pub const SLIDE_SUFFIX: &str = "/slide";

    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
}

/// Target mode values for relationships.
pub mod target_mode {
    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}
