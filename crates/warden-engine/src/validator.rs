//! # Document Validator
//!
//! Walks JSON documents against compiled registry entries and collects
//! every violation found. Validation is side-effect free: the same
//! document and registry always produce the same violation set, and the
//! walk never mutates either.
//!
//! ## Null Handling
//!
//! `null` and absent values are equivalent. Only `not_null` fails on
//! them; every other rule passes, and the walk never descends into a
//! null subtree. A missing field therefore produces at most one
//! violation, at the position where `not_null` is declared.

use std::sync::Arc;

use serde_json::Value;

use warden_core::{PropertyPath, Violation, ViolationSet};

use crate::constraint::CompiledConstraint;
use crate::error::EngineError;
use crate::registry::{CompiledShape, CompiledValue, ConstraintRegistry};

/// Checks documents, method parameters, and method return values
/// against a shared registry.
///
/// Cheap to clone; holds only an `Arc` to the registry.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<ConstraintRegistry>,
}

impl Validator {
    pub fn new(registry: Arc<ConstraintRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this validator reads from.
    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    /// Validate a whole document against a registered type.
    ///
    /// Fields declared by the type but absent from the document are
    /// treated as `null`. Document fields without a declared schema are
    /// ignored.
    ///
    /// # Errors
    ///
    /// `EngineError::UnknownType` if `type_name` is not registered and
    /// `EngineError::DocumentShape` if the document root is not a JSON
    /// object. Neither condition is ever reported as a passing result.
    pub fn validate(&self, document: &Value, type_name: &str) -> Result<ViolationSet, EngineError> {
        let ty = self
            .registry
            .types
            .get(type_name)
            .ok_or_else(|| EngineError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        let Value::Object(fields) = document else {
            return Err(EngineError::DocumentShape {
                type_name: type_name.to_string(),
            });
        };

        let mut violations = ViolationSet::new();
        for field in &ty.fields {
            let value = fields.get(&field.name).unwrap_or(&Value::Null);
            let path = PropertyPath::of(&field.name);
            self.check_value(&path, &field.value, value, &mut violations)?;
        }
        Ok(violations)
    }

    /// Validate one argument of a registered method. Violation paths
    /// start at `method.parameter`.
    ///
    /// # Errors
    ///
    /// `EngineError::UnknownMethod` and `EngineError::UnknownParameter`
    /// for contract names that were never registered.
    pub fn validate_parameter(
        &self,
        method: &str,
        parameter: &str,
        value: &Value,
    ) -> Result<ViolationSet, EngineError> {
        let contract =
            self.registry
                .methods
                .get(method)
                .ok_or_else(|| EngineError::UnknownMethod {
                    method: method.to_string(),
                })?;
        let (_, schema) = contract
            .parameters
            .iter()
            .find(|(name, _)| name == parameter)
            .ok_or_else(|| EngineError::UnknownParameter {
                method: method.to_string(),
                parameter: parameter.to_string(),
            })?;

        let mut violations = ViolationSet::new();
        let path = PropertyPath::of(method).property(parameter);
        self.check_value(&path, schema, value, &mut violations)?;
        Ok(violations)
    }

    /// Validate the return value of a registered method. Violation
    /// paths start at `method.<return value>`. Methods without a
    /// declared return schema always pass.
    ///
    /// # Errors
    ///
    /// `EngineError::UnknownMethod` if `method` is not registered.
    pub fn validate_return(&self, method: &str, value: &Value) -> Result<ViolationSet, EngineError> {
        let contract =
            self.registry
                .methods
                .get(method)
                .ok_or_else(|| EngineError::UnknownMethod {
                    method: method.to_string(),
                })?;

        let mut violations = ViolationSet::new();
        if let Some(schema) = &contract.return_value {
            let path = PropertyPath::of(method).return_value();
            self.check_value(&path, schema, value, &mut violations)?;
        }
        Ok(violations)
    }

    fn check_value(
        &self,
        path: &PropertyPath,
        schema: &CompiledValue,
        value: &Value,
        violations: &mut ViolationSet,
    ) -> Result<(), EngineError> {
        check_constraints(path, &schema.constraints, value, violations);
        if value.is_null() {
            return Ok(());
        }
        match &schema.shape {
            CompiledShape::Scalar => Ok(()),
            CompiledShape::List { element } => {
                let Value::Array(items) = value else {
                    return Ok(());
                };
                for (index, item) in items.iter().enumerate() {
                    self.check_value(&path.list_element(index), element, item, violations)?;
                }
                Ok(())
            }
            CompiledShape::Map {
                key_constraints,
                value: value_schema,
            } => {
                let Value::Object(entries) = value else {
                    return Ok(());
                };
                // serde_json maps iterate in sorted key order, so the
                // walk itself is deterministic independent of insertion.
                for (key, entry) in entries {
                    check_constraints(
                        &path.map_key(key),
                        key_constraints,
                        &Value::String(key.clone()),
                        violations,
                    );
                    self.check_value(&path.map_value(key), value_schema, entry, violations)?;
                }
                Ok(())
            }
            CompiledShape::Object { type_name } => {
                let ty =
                    self.registry
                        .types
                        .get(type_name)
                        .ok_or_else(|| EngineError::UnknownType {
                            type_name: type_name.clone(),
                        })?;
                let Value::Object(fields) = value else {
                    return Ok(());
                };
                for field in &ty.fields {
                    let nested = fields.get(&field.name).unwrap_or(&Value::Null);
                    self.check_value(
                        &path.property(&field.name),
                        &field.value,
                        nested,
                        violations,
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn check_constraints(
    path: &PropertyPath,
    constraints: &[CompiledConstraint],
    value: &Value,
    violations: &mut ViolationSet,
) {
    for constraint in constraints {
        if !constraint.is_satisfied_by(value) {
            violations.insert(Violation::new(path, constraint.decl().message()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::schema::{MethodSchema, TypeSchema, ValueSchema};
    use serde_json::json;

    fn profile_validator() -> Validator {
        let registry = ConstraintRegistry::builder()
            .register_type(
                TypeSchema::new("profile")
                    .field(
                        "email",
                        ValueSchema::scalar([Constraint::NotNull, Constraint::Email]),
                    )
                    .field(
                        "additional_emails",
                        ValueSchema::list(ValueSchema::scalar([Constraint::Email])),
                    )
                    .field(
                        "categorized_emails",
                        ValueSchema::map(
                            [Constraint::length_min(3)],
                            ValueSchema::list(ValueSchema::scalar([Constraint::Email])),
                        ),
                    )
                    .field("score", ValueSchema::scalar([Constraint::Min { value: 0 }])),
            )
            .register_method(
                MethodSchema::new("greeting")
                    .parameter("name", ValueSchema::scalar([Constraint::NotNull])),
            )
            .register_method(
                MethodSchema::new("normalized_score").returns(ValueSchema::scalar([
                    Constraint::Digits {
                        integer: 3,
                        fraction: 0,
                    },
                ])),
            )
            .build()
            .unwrap();
        Validator::new(Arc::new(registry))
    }

    #[test]
    fn valid_document_passes() {
        let v = profile_validator();
        let doc = json!({
            "email": "dev@example.org",
            "additional_emails": [],
            "categorized_emails": {"work": ["dev@example.org"]},
            "score": 10
        });
        let violations = v.validate(&doc, "profile").unwrap();
        assert!(violations.is_empty());
        assert_eq!(violations.to_string(), "passed");
    }

    #[test]
    fn invalid_document_reports_every_violation_sorted() {
        let v = profile_validator();
        let doc = json!({
            "email": "oops",
            "additional_emails": ["nope"],
            "categorized_emails": {"a": ["bad"]},
            "score": -1
        });
        let violations = v.validate(&doc, "profile").unwrap();
        assert_eq!(
            violations.to_string(),
            "failed: additional_emails[0].<list element> (must be a well-formed email address), \
             categorized_emails<K>[a].<map key> (length must be between 3 and 2147483647), \
             categorized_emails[a].<map value>[0].<list element> (must be a well-formed email address), \
             email (must be a well-formed email address), \
             score (must be greater than or equal to 0)"
        );
    }

    #[test]
    fn map_key_sorts_before_map_value_for_same_key() {
        let v = profile_validator();
        let doc = json!({
            "email": "dev@example.org",
            "categorized_emails": {"a": ["bad"]},
            "score": 0
        });
        let violations = v.validate(&doc, "profile").unwrap();
        let paths: Vec<&str> = violations.iter().map(|vi| vi.path()).collect();
        assert_eq!(
            paths,
            vec![
                "categorized_emails<K>[a].<map key>",
                "categorized_emails[a].<map value>[0].<list element>"
            ]
        );
    }

    #[test]
    fn missing_field_is_null_and_only_not_null_fires() {
        let v = profile_validator();
        let violations = v.validate(&json!({}), "profile").unwrap();
        assert_eq!(violations.to_string(), "failed: email (must not be null)");
    }

    #[test]
    fn null_subtree_is_not_descended() {
        let v = profile_validator();
        let doc = json!({
            "email": "dev@example.org",
            "additional_emails": null,
            "categorized_emails": null,
            "score": 0
        });
        let violations = v.validate(&doc, "profile").unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn type_inapplicable_values_pass() {
        // A number where a list is declared: no list descent, no
        // violation, because no constraint targets the position itself.
        let v = profile_validator();
        let doc = json!({
            "email": "dev@example.org",
            "additional_emails": 42,
            "score": 0
        });
        let violations = v.validate(&doc, "profile").unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn undeclared_fields_are_ignored() {
        let v = profile_validator();
        let doc = json!({
            "email": "dev@example.org",
            "score": 0,
            "nickname": null
        });
        assert!(v.validate(&doc, "profile").unwrap().is_empty());
    }

    #[test]
    fn unknown_type_is_an_error_not_a_pass() {
        let v = profile_validator();
        let err = v.validate(&json!({}), "ghost").unwrap_err();
        assert!(matches!(err, EngineError::UnknownType { .. }));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let v = profile_validator();
        let err = v.validate(&json!([1, 2, 3]), "profile").unwrap_err();
        assert!(matches!(err, EngineError::DocumentShape { .. }));
    }

    #[test]
    fn validation_is_idempotent() {
        let v = profile_validator();
        let doc = json!({"email": "oops", "score": -1});
        let first = v.validate(&doc, "profile").unwrap();
        let second = v.validate(&doc, "profile").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parameter_violation_path_is_method_dot_parameter() {
        let v = profile_validator();
        let violations = v
            .validate_parameter("greeting", "name", &Value::Null)
            .unwrap();
        assert_eq!(
            violations.to_string(),
            "failed: greeting.name (must not be null)"
        );
    }

    #[test]
    fn parameter_passes_with_value_present() {
        let v = profile_validator();
        let violations = v
            .validate_parameter("greeting", "name", &json!("world"))
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn unknown_parameter_is_an_error() {
        let v = profile_validator();
        let err = v
            .validate_parameter("greeting", "ghost", &Value::Null)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownParameter { .. }));
    }

    #[test]
    fn return_value_path_uses_marker() {
        let v = profile_validator();
        let violations = v.validate_return("normalized_score", &json!(1234)).unwrap();
        assert_eq!(
            violations.to_string(),
            "failed: normalized_score.<return value> \
             (numeric value out of bounds (<3 digits>.<0 digits> expected))"
        );
    }

    #[test]
    fn return_value_within_bounds_passes() {
        let v = profile_validator();
        let violations = v.validate_return("normalized_score", &json!(999)).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn method_without_return_schema_always_passes() {
        let v = profile_validator();
        let violations = v.validate_return("greeting", &json!("anything")).unwrap();
        assert!(violations.is_empty());
    }
}
