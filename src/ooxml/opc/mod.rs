//! Open Packaging Convention relationship parts.
//!
//! Slides reference pictures and link targets indirectly through `rId`
//! identifiers; the sibling `_rels/slideN.xml.rels` part maps each `rId` to a
//! relationship type and target path.

pub mod constants;
pub mod rel;

pub use rel::{Relationship, Relationships, slide_number_in_target};
