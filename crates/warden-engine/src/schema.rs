//! # Declarative Schemas
//!
//! Statically declared structure for validated types and methods, the
//! explicit replacement for reflection-driven traversal. Each validated
//! type registers its property list and nested-structure shape at
//! startup; the validator walks values guided by these declarations
//! only.
//!
//! All schema types are serde round-trippable so registries can be
//! built from descriptor files (`*.schema.json`) as well as from code.

use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;

/// Constraints plus nested structure for one value position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSchema {
    /// Rules applied to the value at this position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    /// Structure beneath this position.
    #[serde(default, skip_serializing_if = "Shape::is_scalar")]
    pub shape: Shape,
}

/// The declared structure of a value position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// A leaf value; constraints only.
    #[default]
    Scalar,
    /// A sequence whose elements share one schema.
    List {
        /// Schema applied to every element.
        element: Box<ValueSchema>,
    },
    /// A string-keyed map.
    Map {
        /// Rules applied to each key.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        key_constraints: Vec<Constraint>,
        /// Schema applied to each value.
        value: Box<ValueSchema>,
    },
    /// A nested registered type.
    Object {
        /// Name of the registered type.
        type_name: String,
    },
}

impl Shape {
    fn is_scalar(shape: &Shape) -> bool {
        matches!(shape, Shape::Scalar)
    }
}

impl ValueSchema {
    /// A scalar position with the given rules.
    pub fn scalar(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self {
            constraints: constraints.into_iter().collect(),
            shape: Shape::Scalar,
        }
    }

    /// A list position whose elements follow `element`.
    pub fn list(element: ValueSchema) -> Self {
        Self {
            constraints: Vec::new(),
            shape: Shape::List {
                element: Box::new(element),
            },
        }
    }

    /// A map position with key rules and a per-value schema.
    pub fn map(key_constraints: impl IntoIterator<Item = Constraint>, value: ValueSchema) -> Self {
        Self {
            constraints: Vec::new(),
            shape: Shape::Map {
                key_constraints: key_constraints.into_iter().collect(),
                value: Box::new(value),
            },
        }
    }

    /// A nested-object position referencing a registered type.
    pub fn object(type_name: impl Into<String>) -> Self {
        Self {
            constraints: Vec::new(),
            shape: Shape::Object {
                type_name: type_name.into(),
            },
        }
    }

    /// Add a rule at this position.
    pub fn constrain(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// One named field of a validated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name as it appears in documents.
    pub name: String,
    /// Constraints and structure of the field's value.
    #[serde(default)]
    pub value: ValueSchema,
}

/// The declared property list of one validated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSchema {
    /// Registry key for this type.
    pub name: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl TypeSchema {
    /// Start a type schema with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, value: ValueSchema) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            value,
        });
        self
    }
}

/// One named parameter of a validated method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name.
    pub name: String,
    /// Constraints and structure of the argument value.
    #[serde(default)]
    pub value: ValueSchema,
}

/// Contract of a validated method: parameter preconditions and an
/// optional return-value postcondition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSchema {
    /// Registry key for this method.
    pub name: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,
    /// Return-value schema, when the return is constrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<ValueSchema>,
}

impl MethodSchema {
    /// Start a method schema with no parameters or return contract.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_value: None,
        }
    }

    /// Append a parameter precondition.
    pub fn parameter(mut self, name: impl Into<String>, value: ValueSchema) -> Self {
        self.parameters.push(ParameterSchema {
            name: name.into(),
            value,
        });
        self
    }

    /// Declare the return-value postcondition.
    pub fn returns(mut self, value: ValueSchema) -> Self {
        self.return_value = Some(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_round_trip() {
        let schema = TypeSchema::new("profile")
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
            );
        let json = serde_json::to_string_pretty(&schema).unwrap();
        let back: TypeSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }

    #[test]
    fn shape_defaults_to_scalar() {
        let field: FieldSchema = serde_json::from_str(
            r#"{ "name": "email", "value": { "constraints": [{"rule":"email"}] } }"#,
        )
        .unwrap();
        assert_eq!(field.value.shape, Shape::Scalar);
    }

    #[test]
    fn omitted_value_means_unconstrained_scalar() {
        let field: FieldSchema = serde_json::from_str(r#"{ "name": "nickname" }"#).unwrap();
        assert!(field.value.constraints.is_empty());
        assert_eq!(field.value.shape, Shape::Scalar);
    }

    #[test]
    fn method_schema_round_trip() {
        let method = MethodSchema::new("greeting")
            .parameter("name", ValueSchema::scalar([Constraint::NotNull]))
            .returns(ValueSchema::scalar([Constraint::length_min(1)]));
        let json = serde_json::to_string(&method).unwrap();
        let back: MethodSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(method, back);
    }
}
