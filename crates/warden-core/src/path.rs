//! # Property Paths — Structured Addresses into a Value Graph
//!
//! A [`PropertyPath`] addresses the violated value inside a nested
//! document: fields, list elements, map keys, map values, and method
//! return values.
//!
//! ## Rendering Contract
//!
//! The rendered form is a fixed wire contract asserted byte-for-byte by
//! downstream consumers. Container decorations attach to the *preceding*
//! rendered text; marker names are dot-joined:
//!
//! ```text
//! additional_emails[0].<list element>
//! categorized_emails<K>[a].<map key>
//! categorized_emails[a].<map value>[0].<list element>
//! greeting.name
//! normalized_score.<return value>
//! ```
//!
//! Do not "improve" this format: sorted violation output and the
//! diagnostic `property path:` line both depend on it verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// A named field, method, or parameter.
    Property(String),
    /// An element of a sequence-valued property. The index is kept for
    /// diagnostics; `None` renders as `[]`.
    ListElement(Option<usize>),
    /// A key of a map-valued property, rendered with the `<K>` marker.
    MapKey(String),
    /// A value of a map-valued property, bracketed by its key.
    MapValue(String),
    /// The return value of a validated method.
    ReturnValue,
}

/// An ordered sequence of path segments, composed left-to-right in
/// traversal order.
///
/// Paths are built by cloning-and-extending, so sibling branches of a
/// traversal never observe each other's segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    /// The empty path (document root).
    pub fn root() -> Self {
        Self::default()
    }

    /// Path starting at a named property.
    pub fn of(name: impl Into<String>) -> Self {
        Self::root().property(name)
    }

    /// Extend with a named property, method, or parameter segment.
    pub fn property(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Property(name.into()))
    }

    /// Extend with a list-element segment carrying the element index.
    pub fn list_element(&self, index: usize) -> Self {
        self.push(PathSegment::ListElement(Some(index)))
    }

    /// Extend with a map-key segment.
    pub fn map_key(&self, key: impl Into<String>) -> Self {
        self.push(PathSegment::MapKey(key.into()))
    }

    /// Extend with a map-value segment bracketed by the entry's key.
    pub fn map_value(&self, key: impl Into<String>) -> Self {
        self.push(PathSegment::MapValue(key.into()))
    }

    /// Extend with the `<return value>` marker.
    pub fn return_value(&self) -> Self {
        self.push(PathSegment::ReturnValue)
    }

    /// Render the path per the fixed formatting contract.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Property(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::ReturnValue => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str("<return value>");
                }
                PathSegment::ListElement(index) => {
                    match index {
                        Some(i) => {
                            out.push('[');
                            out.push_str(&i.to_string());
                            out.push(']');
                        }
                        None => out.push_str("[]"),
                    }
                    out.push_str(".<list element>");
                }
                PathSegment::MapKey(key) => {
                    out.push_str("<K>[");
                    out.push_str(key);
                    out.push_str("].<map key>");
                }
                PathSegment::MapValue(key) => {
                    out.push('[');
                    out.push_str(key);
                    out.push_str("].<map value>");
                }
            }
        }
        out
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
