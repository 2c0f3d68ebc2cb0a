//! Hyperlink support for slide shapes.
//!
//! A hyperlink in slide markup is only an rId; the slide relationships say
//! where it goes.

use crate::ooxml::opc::Relationships;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A resolved hyperlink as written to output documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    /// Relationship id in the slide relationships
    #[serde(rename = "rId")]
    pub r_id: String,
    /// Relationship target as written in the relationships part
    pub target: String,
    /// Slide number for intra-deck links
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target_slide: Option<u32>,
}

impl Hyperlink {
    /// Resolve an rId against the slide relationships.
    ///
    /// An rId missing from the relationships is skipped with a warning.
    pub fn resolve(r_id: &str, rels: &Relationships) -> Option<Self> {
        let Some(rel) = rels.get(r_id) else {
            warn!(r_id, "hyperlink relationship not found, skipping");
            return None;
        };
        Some(Self {
            r_id: r_id.to_string(),
            target: rel.target_ref().to_string(),
            target_slide: rel.linked_slide(),
        })
    }
}
