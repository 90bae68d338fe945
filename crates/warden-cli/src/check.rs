//! # Check Subcommand
//!
//! Offline document validation: loads `*.schema.json` type descriptors
//! from a directory, validates each given JSON document against a
//! registered type, and prints a summary report.
//!
//! A document that fails its constraints is a validation failure (exit
//! code 1). A descriptor that cannot be compiled, an unknown type name,
//! or an unreadable document is an operational error (exit code 2).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use warden_engine::{ConstraintRegistry, Validator};

/// Arguments for the `warden check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory containing *.schema.json type descriptors.
    #[arg(long, default_value = "schemas")]
    pub schemas: PathBuf,

    /// Registered type to validate the documents against.
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: String,

    /// JSON documents to check.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure, 2 on
/// operational error (via the `Err` arm in main).
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let registry = ConstraintRegistry::from_dir(&args.schemas)
        .with_context(|| format!("failed to load schemas from {}", args.schemas.display()))?;

    tracing::info!(
        type_count = registry.type_count(),
        "loaded constraint registry"
    );

    if !registry.contains_type(&args.type_name) {
        anyhow::bail!(
            "unknown type {:?}; registered types: {}",
            args.type_name,
            registry.type_names().join(", ")
        );
    }

    let validator = Validator::new(std::sync::Arc::new(registry));

    let total = args.paths.len();
    let mut passed = 0usize;
    let mut failures: Vec<(&PathBuf, String)> = Vec::new();

    for path in &args.paths {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?;

        let violations = validator
            .validate(&document, &args.type_name)
            .with_context(|| format!("cannot validate {}", path.display()))?;

        if violations.is_empty() {
            passed += 1;
        } else {
            failures.push((path, violations.to_string()));
        }
    }

    println!("Documents: {passed}/{total} passed");
    for (path, outcome) in &failures {
        println!("  FAIL: {} — {}", path.display(), outcome);
    }

    if failures.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}
