//! Generic XML element tree used to query slide and relationship parts.
//!
//! The tree is built in one pass with quick-xml and then queried by
//! namespace-qualified local names, the way `p:sp` or `a:custGeom` are
//! addressed in DrawingML.

// Submodule declarations
pub mod element;
pub mod entity;
pub mod namespace;

// Re-exports
pub use element::{Descendants, XmlAttribute, XmlElement};
pub use namespace::Namespace;
