//! # Shipped Descriptor Tests
//!
//! Loads the repository's `schemas/` directory and checks that the
//! profile descriptor produces the same outcomes as an in-code
//! registration would. Guards the JSON descriptors against drifting
//! from the engine's serde shapes.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use warden_engine::{ConstraintRegistry, Validator};

fn repo_schemas_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../schemas")
}

fn validator() -> Validator {
    let registry = ConstraintRegistry::from_dir(repo_schemas_dir()).unwrap();
    Validator::new(Arc::new(registry))
}

#[test]
fn profile_descriptor_loads() {
    let registry = ConstraintRegistry::from_dir(repo_schemas_dir()).unwrap();
    assert!(registry.contains_type("profile"));
}

#[test]
fn good_profile_passes() {
    let doc = json!({
        "email": "dev@example.org",
        "additional_emails": [],
        "categorized_emails": {"work": ["dev@example.org"]},
        "score": 10
    });
    let violations = validator().validate(&doc, "profile").unwrap();
    assert!(violations.is_empty());
}

#[test]
fn bad_profile_reports_all_positions() {
    let doc = json!({
        "email": "oops",
        "additional_emails": ["nope"],
        "categorized_emails": {"a": ["bad"]},
        "score": -1
    });
    let violations = validator().validate(&doc, "profile").unwrap();
    assert_eq!(
        violations.to_string(),
        "failed: additional_emails[0].<list element> (must be a well-formed email address), \
         categorized_emails<K>[a].<map key> (length must be between 3 and 2147483647), \
         categorized_emails[a].<map value>[0].<list element> (must be a well-formed email address), \
         email (must be a well-formed email address), \
         score (must be greater than or equal to 0)"
    );
}
