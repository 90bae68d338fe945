//! # Violations — Constraint Failures with Deterministic Rendering
//!
//! A [`Violation`] is one constraint failure at one property path. A
//! [`ViolationSet`] is the outcome of a validation call: a sorted set
//! whose `Display` is the formatter contract asserted by clients:
//!
//! - empty set renders the literal success token `passed`;
//! - otherwise `failed: ` followed by `<path> (<message>)` entries,
//!   sorted by rendered path then message, joined by `", "`.
//!
//! Sorting lives in the data structure (a `BTreeSet`), not in the
//! renderer, so equality between two outcomes is order-independent and
//! every rendering of an outcome is byte-identical.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::origin::{ErrorCategory, ViolationOrigin};
use crate::path::PropertyPath;

/// A single constraint failure at a specific property path.
///
/// The path is pre-rendered at construction: ordering and equality are
/// defined over the rendered form, which is what the output contract
/// sorts by. Field order matters: the derived `Ord` compares path
/// first, then message.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Violation {
    path: String,
    message: String,
}

impl Violation {
    /// Create a violation at `path` with a rendered constraint message.
    pub fn new(path: &PropertyPath, message: impl Into<String>) -> Self {
        Self {
            path: path.render(),
            message: message.into(),
        }
    }

    /// The rendered property path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The human-readable constraint message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.message)
    }
}

/// The outcome of one validation call: a sorted set of violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationSet {
    violations: BTreeSet<Violation>,
}

impl ViolationSet {
    /// Create an empty (passing) set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation. Duplicate (path, message) pairs collapse:
    /// set semantics, one violation per independently failing leaf rule.
    pub fn insert(&mut self, violation: Violation) {
        self.violations.insert(violation);
    }

    /// True when validation passed.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Iterate in rendered-path-then-message order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// The first violation in sort order, if any.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.iter().next()
    }

    /// Constraint messages in sort order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(Violation::message)
    }
}

impl FromIterator<Violation> for ViolationSet {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ViolationSet {
    type Item = Violation;
    type IntoIter = std::collections::btree_set::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl fmt::Display for ViolationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return f.write_str("passed");
        }
        f.write_str("failed: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// A non-empty validation outcome promoted to an error, tagged with the
/// origin of the violated value.
///
/// The origin is attached at the call site that knows where the value
/// came from; everything downstream (status code, log policy) is derived
/// from it as data.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{violations}")]
pub struct ConstraintViolationError {
    /// Where the violated value originated.
    pub origin: ViolationOrigin,
    /// The violations produced by the validation call.
    pub violations: ViolationSet,
}

impl ConstraintViolationError {
    /// Wrap a non-empty violation set with its origin tag.
    pub fn new(origin: ViolationOrigin, violations: ViolationSet) -> Self {
        Self { origin, violations }
    }

    /// The error category this origin classifies to.
    pub fn category(&self) -> ErrorCategory {
        self.origin.category()
    }
}
