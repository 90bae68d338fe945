//! Engine error types.
//!
//! These are operational errors (misdeclared schemas, unknown lookups,
//! unreadable descriptor files), never constraint violations, which are
//! data carried in `warden_core::ViolationSet`.

use thiserror::Error;

/// Error during registry construction or a validation call.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The requested type is not registered.
    #[error("unknown type '{type_name}': not registered in the constraint registry")]
    UnknownType {
        /// The type name that failed to resolve.
        type_name: String,
    },

    /// The requested method is not registered.
    #[error("unknown method '{method}': not registered in the constraint registry")]
    UnknownMethod {
        /// The method name that failed to resolve.
        method: String,
    },

    /// The requested parameter does not exist on the method's schema.
    #[error("unknown parameter '{parameter}' on method '{method}'")]
    UnknownParameter {
        /// The method that was looked up.
        method: String,
        /// The parameter name that failed to resolve.
        parameter: String,
    },

    /// Two type schemas were registered under the same name.
    #[error("duplicate type '{type_name}' registered")]
    DuplicateType {
        /// The colliding type name.
        type_name: String,
    },

    /// Two method schemas were registered under the same name.
    #[error("duplicate method '{method}' registered")]
    DuplicateMethod {
        /// The colliding method name.
        method: String,
    },

    /// The same rule id was declared twice at one property segment.
    #[error("duplicate rule '{rule}' at {owner}.{segment}")]
    DuplicateRule {
        /// The type or method owning the segment.
        owner: String,
        /// The property segment carrying the duplicate.
        segment: String,
        /// The rule id declared twice.
        rule: String,
    },

    /// A `pattern` rule failed to compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The regex source that failed to compile.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// An `object` shape references a type that is not registered.
    #[error("dangling object reference to '{type_name}' from {owner}.{segment}")]
    DanglingReference {
        /// The referenced type name.
        type_name: String,
        /// The type or method owning the reference.
        owner: String,
        /// The property segment carrying the reference.
        segment: String,
    },

    /// A descriptor file could not be read or parsed.
    #[error("schema load error for '{name}': {reason}")]
    SchemaLoad {
        /// Descriptor filename or identifier.
        name: String,
        /// Reason the descriptor could not be loaded.
        reason: String,
    },

    /// The root document was not a JSON object.
    #[error("document for type '{type_name}' must be a JSON object")]
    DocumentShape {
        /// The type the document was validated against.
        type_name: String,
    },

    /// IO error reading a descriptor directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
