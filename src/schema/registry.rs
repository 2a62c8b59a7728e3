use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{FieldKind, Shape, TypeShape, classify, error::SchemaError};

/// A registered field: its member name, kind, and for complex objects the
/// registered type to descend into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl FieldSchema {
    pub fn primitive(name: impl Into<String>) -> Self {
        FieldSchema {
            name: name.into(),
            kind: FieldKind::Primitive,
            type_name: None,
        }
    }

    pub fn list(name: impl Into<String>) -> Self {
        FieldSchema {
            name: name.into(),
            kind: FieldKind::OrderedList,
            type_name: None,
        }
    }

    pub fn object(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        FieldSchema {
            name: name.into(),
            kind: FieldKind::ComplexObject,
            type_name: Some(type_name.into()),
        }
    }
}

/// Ordered field list of one record type. Fields are diffed in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl ObjectSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        ObjectSchema {
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn check_fields(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    type_name: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if field.kind == FieldKind::ComplexObject && field.type_name.is_none() {
                return Err(SchemaError::MissingTypeReference {
                    type_name: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Field descriptors of every diffable record type, keyed by type name.
///
/// Built once ahead of diffing, either from [`Shape`] implementations or from
/// a [`SchemaDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    types: BTreeMap<String, ObjectSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` and every record type reachable through its complex
    /// fields, and returns the schema of `T`.
    pub fn register<T: Shape + ?Sized>(&mut self) -> Result<&ObjectSchema, SchemaError> {
        self.register_shape(T::shape())
    }

    pub fn register_shape(&mut self, shape: TypeShape) -> Result<&ObjectSchema, SchemaError> {
        let root = shape.type_name;
        if classify(&shape) != Ok(FieldKind::ComplexObject) {
            return Err(SchemaError::NotAnObject {
                type_name: root.to_string(),
            });
        }

        // Nothing is committed unless the whole graph classifies
        let mut staged: BTreeMap<String, ObjectSchema> = BTreeMap::new();
        let mut pending = vec![shape];

        while let Some(shape) = pending.pop() {
            if self.types.contains_key(shape.type_name) || staged.contains_key(shape.type_name) {
                continue;
            }

            let mut fields = Vec::new();
            for decl in shape.fields() {
                let field_shape = (decl.shape)();
                let kind = classify(&field_shape)
                    .map_err(|e| SchemaError::classification(shape.type_name, decl.name, e))?;

                let type_name = if kind == FieldKind::ComplexObject {
                    pending.push(field_shape);
                    Some(field_shape.type_name.to_string())
                } else {
                    None
                };

                fields.push(FieldSchema {
                    name: decl.name.to_string(),
                    kind,
                    type_name,
                });
            }

            let schema = ObjectSchema::new(shape.type_name, fields);
            schema.check_fields()?;
            trace!(type_name = shape.type_name, fields = schema.fields.len(), "registered type");
            staged.insert(schema.name.clone(), schema);
        }

        self.types.extend(staged);
        self.object(root)
    }

    /// Adds a hand-written schema, replacing any previous one of that name.
    pub fn insert(&mut self, schema: ObjectSchema) -> Result<(), SchemaError> {
        schema.check_fields()?;
        self.types.insert(schema.name.clone(), schema);
        Ok(())
    }

    pub fn get(&self, type_name: &str) -> Option<&ObjectSchema> {
        self.types.get(type_name)
    }

    pub fn object(&self, type_name: &str) -> Result<&ObjectSchema, SchemaError> {
        self.get(type_name)
            .ok_or_else(|| SchemaError::unknown_type(type_name))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Checks that every complex field refers to a registered type.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for schema in self.types.values() {
            for field in &schema.fields {
                if let Some(type_name) = &field.type_name
                    && field.kind == FieldKind::ComplexObject
                    && !self.contains(type_name)
                {
                    return Err(SchemaError::unknown_type(type_name));
                }
            }
        }
        Ok(())
    }
}

/// Schema declared as data, e.g. loaded from a JSON file.
///
/// ```json
/// {
///   "root": "Order",
///   "types": [
///     { "name": "Order", "fields": [
///       { "name": "id", "kind": "primitive" },
///       { "name": "customer", "kind": "complex_object", "type": "Customer" },
///       { "name": "lines", "kind": "ordered_list" }
///     ]},
///     { "name": "Customer", "fields": [{ "name": "email", "kind": "primitive" }] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub root: String,
    pub types: Vec<ObjectSchema>,
}

impl SchemaDocument {
    /// Builds a validated registry and returns it with the root type name.
    pub fn into_registry(self) -> Result<(SchemaRegistry, String), SchemaError> {
        let mut registry = SchemaRegistry::new();
        for schema in self.types {
            if registry.contains(&schema.name) {
                return Err(SchemaError::DuplicateType {
                    type_name: schema.name,
                });
            }
            registry.insert(schema)?;
        }
        registry.validate()?;
        registry.object(&self.root)?;

        Ok((registry, self.root))
    }
}
