//! # warden-core — Foundational Types for the Warden Validation Stack
//!
//! This crate defines the vocabulary shared by the constraint engine and
//! the reporting boundary. Every other crate in the workspace depends on
//! `warden-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Property paths are structured data.** A [`PropertyPath`] is an
//!    ordered segment sequence, not a string. The rendered form
//!    (`categorized_emails<K>[a].<map key>`) is a fixed formatting
//!    contract, produced in exactly one place.
//!
//! 2. **Violations are a sorted set.** [`ViolationSet`] iterates in
//!    rendered-path-then-message order so every rendering of the same
//!    validation outcome is byte-identical.
//!
//! 3. **Error classification is data, not control flow.** A violation's
//!    [`ViolationOrigin`] is tagged at the call site and carried to the
//!    reporter inside [`ConstraintViolationError`]. No classification
//!    by stack unwinding or exception type.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `warden-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod correlation;
pub mod origin;
pub mod path;
pub mod violation;

// Re-export primary types for ergonomic imports.
pub use correlation::ErrorId;
pub use origin::{ErrorCategory, ViolationOrigin};
pub use path::{PathSegment, PropertyPath};
pub use violation::{ConstraintViolationError, Violation, ViolationSet};
