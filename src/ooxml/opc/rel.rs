//! Relationship-related objects for slide parts.
//!
//! This module reads the `.rels` part that sits next to a slide and answers
//! the two questions extraction needs: which file does an image `rId` point
//! to, and which slide does a hyperlink `rId` jump to.
use crate::common::xml::{Namespace, XmlElement};
use crate::common::{Error, Result};
use crate::ooxml::opc::constants::{relationship_type, target_mode};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// A single relationship from a slide to a target.
///
/// Identified by an rId. Can be either internal (pointing to another part of
/// the deck) or external (pointing to a URL).
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a relative part path or external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Create a new relationship.
    pub fn new(r_id: String, reltype: String, target_ref: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Slide number this relationship jumps to, for intra-deck links.
    ///
    /// Hyperlink relationships whose target carries a URI scheme are external
    /// links and yield `None`, as do internal targets that do not name a
    /// `slideN.xml` part.
    pub fn linked_slide(&self) -> Option<u32> {
        let is_link = self.reltype.contains(relationship_type::HYPERLINK_FRAGMENT)
            || self.reltype.ends_with(relationship_type::SLIDE_SUFFIX);
        if !is_link || self.is_external || has_uri_scheme(&self.target_ref) {
            return None;
        }
        slide_number_in_target(&self.target_ref)
    }

    /// Resolve the target against the directory holding the source part.
    ///
    /// `../media/image3.png` relative to `deck/slides` becomes
    /// `deck/media/image3.png`. The path is normalised lexically; nothing is
    /// read from disk.
    pub fn target_path(&self, source_dir: &Path) -> PathBuf {
        normalize_path(&source_dir.join(&self.target_ref))
    }
}

/// Collection of relationships from a single slide.
#[derive(Debug, Default, Clone)]
pub struct Relationships {
    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `.rels` part from disk.
    ///
    /// Fails with [`Error::NotFound`] when the file does not exist and with
    /// [`Error::Parse`] when it is not well-formed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        Self::from_xml(&bytes)
    }

    /// Parse the content of a `.rels` part.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let root = XmlElement::parse(xml)?;
        let mut rels = Self::new();
        for rel in root.find_all(Namespace::PackageRelationships, "Relationship") {
            let Some(r_id) = rel.attr("Id") else {
                continue;
            };
            rels.add_relationship(
                rel.attr("Type").unwrap_or_default().to_string(),
                rel.attr("Target").unwrap_or_default().to_string(),
                r_id.to_string(),
                rel.attr("TargetMode") == Some(target_mode::EXTERNAL),
            );
        }
        Ok(rels)
    }

    /// Add a relationship to the collection.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) {
        let rel = Relationship::new(r_id.clone(), reltype, target_ref, is_external);
        self.rels.insert(r_id, rel);
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.values()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Whether any relationship is an intra-deck slide link.
    pub fn has_slide_links(&self) -> bool {
        self.rels.values().any(|rel| rel.linked_slide().is_some())
    }
}

/// Extract `N` from the last `slideN.xml` occurrence in a target path.
///
/// # Examples
///
/// ```
/// use bonebox::ooxml::opc::slide_number_in_target;
/// assert_eq!(slide_number_in_target("../slides/slide12.xml"), Some(12));
/// assert_eq!(slide_number_in_target("slide.xml"), None);
/// ```
pub fn slide_number_in_target(target: &str) -> Option<u32> {
    target.rmatch_indices("slide").find_map(|(idx, _)| {
        let rest = &target[idx + "slide".len()..];
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || !rest[digits..].starts_with(".xml") {
            return None;
        }
        rest[..digits].parse().ok()
    })
}

/// `scheme:` prefix per RFC 3986 (letter followed by letters, digits, `+`, `-`, `.`).
fn has_uri_scheme(target: &str) -> bool {
    let Some(colon) = target.find(':') else {
        return false;
    };
    let scheme = &target[..colon];
    let mut bytes = scheme.bytes();
    matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic())
        && bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
