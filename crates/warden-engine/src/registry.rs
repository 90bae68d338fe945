//! # Constraint Registry
//!
//! Compiles declarative schemas into their validated, pattern-compiled
//! form and indexes them by type and method name.
//!
//! ## Lifecycle
//!
//! The registry is built once during process startup and never mutated
//! afterward. Share it behind an `Arc`; concurrent validation calls read
//! it without locking.
//!
//! ## Build-Time Rejection
//!
//! `build()` fails on duplicate type or method names, duplicate
//! (owner, segment, rule-id) pairs, invalid `pattern` sources, and
//! `object` shapes referencing unregistered types. A registry that
//! builds cannot fail structurally at validation time.

use std::collections::HashMap;
use std::path::Path;

use crate::constraint::{CompiledConstraint, Constraint};
use crate::error::EngineError;
use crate::schema::{MethodSchema, Shape, TypeSchema, ValueSchema};

/// Compiled value position: constraints with pre-built regexes plus the
/// compiled nested structure.
#[derive(Debug)]
pub(crate) struct CompiledValue {
    pub(crate) constraints: Vec<CompiledConstraint>,
    pub(crate) shape: CompiledShape,
}

/// Compiled structure beneath a value position.
#[derive(Debug)]
pub(crate) enum CompiledShape {
    Scalar,
    List {
        element: Box<CompiledValue>,
    },
    Map {
        key_constraints: Vec<CompiledConstraint>,
        value: Box<CompiledValue>,
    },
    /// Reference into the registry's type table, resolved at walk time.
    /// Build-time checking guarantees the target exists.
    Object {
        type_name: String,
    },
}

/// Compiled field of a type.
#[derive(Debug)]
pub(crate) struct CompiledField {
    pub(crate) name: String,
    pub(crate) value: CompiledValue,
}

/// Compiled property list of a type.
#[derive(Debug)]
pub(crate) struct CompiledType {
    pub(crate) fields: Vec<CompiledField>,
}

/// Compiled method contract.
#[derive(Debug)]
pub(crate) struct CompiledMethod {
    pub(crate) parameters: Vec<(String, CompiledValue)>,
    pub(crate) return_value: Option<CompiledValue>,
}

/// Immutable, concurrently readable constraint metadata store.
#[derive(Debug, Default)]
pub struct ConstraintRegistry {
    pub(crate) types: HashMap<String, CompiledType>,
    pub(crate) methods: HashMap<String, CompiledMethod>,
}

impl ConstraintRegistry {
    /// Start an empty builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from every `*.schema.json` type descriptor in a
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::SchemaLoad` if any descriptor cannot be
    /// read or parsed, plus any `build()` rejection.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, EngineError> {
        let dir = dir.as_ref();
        let mut builder = RegistryBuilder::default();

        let entries = std::fs::read_dir(dir).map_err(|e| EngineError::SchemaLoad {
            name: dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".schema.json") {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            let schema: TypeSchema =
                serde_json::from_str(&content).map_err(|e| EngineError::SchemaLoad {
                    name: name.to_string(),
                    reason: format!("invalid JSON: {e}"),
                })?;
            builder = builder.register_type(schema);
        }

        builder.build()
    }

    /// Number of registered types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Names of all registered types, sorted alphabetically.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// True if `name` is a registered type.
    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// True if `name` is a registered method.
    pub fn contains_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// The declared rules of a type as (segment, rule) pairs in
    /// declaration order. Nested positions render with generic markers
    /// (`field[].<list element>`, `field<K>.<map key>`).
    pub fn rules_for(&self, type_name: &str) -> Option<Vec<(String, &Constraint)>> {
        let ty = self.types.get(type_name)?;
        let mut out = Vec::new();
        for field in &ty.fields {
            collect_rules(&field.name, &field.value, &mut out);
        }
        Some(out)
    }
}

fn collect_rules<'r>(
    segment: &str,
    value: &'r CompiledValue,
    out: &mut Vec<(String, &'r Constraint)>,
) {
    for c in &value.constraints {
        out.push((segment.to_string(), c.decl()));
    }
    match &value.shape {
        CompiledShape::Scalar | CompiledShape::Object { .. } => {}
        CompiledShape::List { element } => {
            collect_rules(&format!("{segment}[].<list element>"), element, out);
        }
        CompiledShape::Map {
            key_constraints,
            value,
        } => {
            for c in key_constraints {
                out.push((format!("{segment}<K>.<map key>"), c.decl()));
            }
            collect_rules(&format!("{segment}[].<map value>"), value, out);
        }
    }
}

/// Accumulates declarative schemas and compiles them into a
/// [`ConstraintRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<TypeSchema>,
    methods: Vec<MethodSchema>,
}

impl RegistryBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a whole type schema.
    pub fn register_type(mut self, schema: TypeSchema) -> Self {
        self.types.push(schema);
        self
    }

    /// Register a method contract.
    pub fn register_method(mut self, schema: MethodSchema) -> Self {
        self.methods.push(schema);
        self
    }

    /// Fine-grained registration: attach one rule to a (type, segment)
    /// pair, creating the type and field entries as needed.
    pub fn rule(mut self, type_name: &str, segment: &str, constraint: Constraint) -> Self {
        let idx = match self.types.iter().position(|t| t.name == type_name) {
            Some(idx) => idx,
            None => {
                self.types.push(TypeSchema::new(type_name));
                self.types.len() - 1
            }
        };
        let ty = &mut self.types[idx];
        match ty.fields.iter_mut().find(|f| f.name == segment) {
            Some(field) => field.value.constraints.push(constraint),
            None => ty.fields.push(crate::schema::FieldSchema {
                name: segment.to_string(),
                value: ValueSchema::scalar([constraint]),
            }),
        }
        self
    }

    /// Compile all registered schemas.
    ///
    /// # Errors
    ///
    /// See the module docs: every structural defect in the declared
    /// schemas is rejected here, not at validation time.
    pub fn build(self) -> Result<ConstraintRegistry, EngineError> {
        let mut registry = ConstraintRegistry::default();

        for schema in self.types {
            if registry.types.contains_key(&schema.name) {
                return Err(EngineError::DuplicateType {
                    type_name: schema.name,
                });
            }
            let mut fields = Vec::with_capacity(schema.fields.len());
            for field in schema.fields {
                let value = compile_value(&schema.name, &field.name, field.value)?;
                fields.push(CompiledField {
                    name: field.name,
                    value,
                });
            }
            registry.types.insert(schema.name, CompiledType { fields });
        }

        for schema in self.methods {
            if registry.methods.contains_key(&schema.name) {
                return Err(EngineError::DuplicateMethod {
                    method: schema.name,
                });
            }
            let mut parameters = Vec::with_capacity(schema.parameters.len());
            for param in schema.parameters {
                let value = compile_value(&schema.name, &param.name, param.value)?;
                parameters.push((param.name, value));
            }
            let return_value = match schema.return_value {
                Some(value) => Some(compile_value(&schema.name, "<return value>", value)?),
                None => None,
            };
            registry.methods.insert(
                schema.name,
                CompiledMethod {
                    parameters,
                    return_value,
                },
            );
        }

        check_references(&registry)?;
        Ok(registry)
    }
}

/// Compile one value position: build regexes and reject duplicate rule
/// ids at the same segment.
fn compile_value(
    owner: &str,
    segment: &str,
    schema: ValueSchema,
) -> Result<CompiledValue, EngineError> {
    let constraints = compile_rules(owner, segment, schema.constraints)?;
    let shape = match schema.shape {
        Shape::Scalar => CompiledShape::Scalar,
        Shape::List { element } => CompiledShape::List {
            element: Box::new(compile_value(
                owner,
                &format!("{segment}[].<list element>"),
                *element,
            )?),
        },
        Shape::Map {
            key_constraints,
            value,
        } => CompiledShape::Map {
            key_constraints: compile_rules(
                owner,
                &format!("{segment}<K>.<map key>"),
                key_constraints,
            )?,
            value: Box::new(compile_value(
                owner,
                &format!("{segment}[].<map value>"),
                *value,
            )?),
        },
        Shape::Object { type_name } => CompiledShape::Object { type_name },
    };
    Ok(CompiledValue { constraints, shape })
}

fn compile_rules(
    owner: &str,
    segment: &str,
    rules: Vec<Constraint>,
) -> Result<Vec<CompiledConstraint>, EngineError> {
    let mut seen: Vec<&'static str> = Vec::new();
    let mut compiled = Vec::with_capacity(rules.len());
    for rule in rules {
        if seen.contains(&rule.id()) {
            return Err(EngineError::DuplicateRule {
                owner: owner.to_string(),
                segment: segment.to_string(),
                rule: rule.id().to_string(),
            });
        }
        seen.push(rule.id());
        compiled.push(CompiledConstraint::compile(rule)?);
    }
    Ok(compiled)
}

/// Verify every `object` shape points at a registered type.
fn check_references(registry: &ConstraintRegistry) -> Result<(), EngineError> {
    for (name, ty) in &registry.types {
        for field in &ty.fields {
            check_value_refs(registry, name, &field.name, &field.value)?;
        }
    }
    for (name, method) in &registry.methods {
        for (param, value) in &method.parameters {
            check_value_refs(registry, name, param, value)?;
        }
        if let Some(value) = &method.return_value {
            check_value_refs(registry, name, "<return value>", value)?;
        }
    }
    Ok(())
}

fn check_value_refs(
    registry: &ConstraintRegistry,
    owner: &str,
    segment: &str,
    value: &CompiledValue,
) -> Result<(), EngineError> {
    match &value.shape {
        CompiledShape::Scalar => Ok(()),
        CompiledShape::List { element } => check_value_refs(registry, owner, segment, element),
        CompiledShape::Map { value, .. } => check_value_refs(registry, owner, segment, value),
        CompiledShape::Object { type_name } => {
            if registry.types.contains_key(type_name) {
                Ok(())
            } else {
                Err(EngineError::DanglingReference {
                    type_name: type_name.clone(),
                    owner: owner.to_string(),
                    segment: segment.to_string(),
                })
            }
        }
    }
}
