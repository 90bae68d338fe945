//! # warden-engine — Constraint Registry and Path-Aware Validator
//!
//! Runtime validation of JSON documents against declaratively registered
//! constraint schemas.
//!
//! ## Security Invariant
//!
//! Validation is a trust boundary. Documents that fail validation must be
//! rejected with structured violation information including the property
//! path and the violated rule's message. Unknown types and methods are
//! hard errors, never silent passes.
//!
//! ## Registry Lifecycle
//!
//! Schemas are declared as data ([`schema`]), compiled once at startup by
//! [`RegistryBuilder::build`] (pattern compilation, duplicate and
//! dangling-reference rejection), and never mutated afterward. The
//! compiled [`ConstraintRegistry`] is shared behind an `Arc`; concurrent
//! validation calls read it without locking.
//!
//! ## Traversal
//!
//! [`Validator`] walks the value graph depth-first, guided by the
//! declared structure, with no runtime type introspection. Each
//! independently failing leaf rule produces one violation tagged with a
//! structured property path; a null (or absent) constrained value
//! produces at most its own `not_null` violation and is not descended
//! into.

pub mod constraint;
pub mod error;
pub mod registry;
pub mod schema;
pub mod validator;

pub use constraint::{CompiledConstraint, Constraint, MAX_LENGTH};
pub use error::EngineError;
pub use registry::{ConstraintRegistry, RegistryBuilder};
pub use schema::{FieldSchema, MethodSchema, ParameterSchema, Shape, TypeSchema, ValueSchema};
pub use validator::Validator;
