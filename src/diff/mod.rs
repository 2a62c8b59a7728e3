//! Structural diff of registered types into an ordered [`Patch`].
//!
//! Fields are visited in declaration order. A field that appears or
//! disappears is added or removed whole, complex fields are diffed
//! recursively, ordered lists go through [`diff_list`] and primitives are
//! compared by value.

mod engine;
mod error;
mod list;
mod patch_operations;

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub use error::DiffError;
pub use list::{ListEdit, Slot, diff_list, edit_script};
pub use patch_operations::PatchOp;

use crate::{
    path::Spath,
    schema::{SchemaDocument, SchemaRegistry, Shape},
};

/// Operations in the order they must be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Vec<PatchOp>);

impl Patch {
    pub fn new(operations: Vec<PatchOp>) -> Self {
        Patch(operations)
    }

    pub(crate) fn push(&mut self, op: PatchOp) {
        self.0.push(op);
    }

    pub fn into_inner(self) -> Vec<PatchOp> {
        self.0
    }
}

impl Deref for Patch {
    type Target = Vec<PatchOp>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Patch {
    type Item = PatchOp;
    type IntoIter = std::vec::IntoIter<PatchOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a PatchOp;
    type IntoIter = std::slice::Iter<'a, PatchOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Diffs two values of the same registered type.
///
/// Builds the schema of `T` on every call; keep a [`PatchGenerator`] around
/// when diffing the same type repeatedly.
pub fn generate<T>(original: &T, modified: &T) -> Result<Patch, DiffError>
where
    T: Shape + Serialize,
{
    PatchGenerator::for_type::<T>()?.generate(original, modified)
}

/// A schema registry bound to the root type being diffed.
#[derive(Debug, Clone)]
pub struct PatchGenerator {
    registry: SchemaRegistry,
    root: String,
}

impl PatchGenerator {
    pub fn for_type<T: Shape + ?Sized>() -> Result<Self, DiffError> {
        let mut registry = SchemaRegistry::new();
        let root = registry.register::<T>()?.name.clone();
        Ok(PatchGenerator { registry, root })
    }

    pub fn from_registry(registry: SchemaRegistry, root: impl Into<String>) -> Result<Self, DiffError> {
        let root = root.into();
        registry.validate()?;
        registry.object(&root)?;
        Ok(PatchGenerator { registry, root })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn generate<T: Serialize + ?Sized>(&self, original: &T, modified: &T) -> Result<Patch, DiffError> {
        let original = serde_json::to_value(original)?;
        let modified = serde_json::to_value(modified)?;
        self.diff_values(&original, &modified)
    }

    /// Diffs two documents already in their serialized form. Either may be
    /// `null`.
    pub fn diff_values(&self, original: &Value, modified: &Value) -> Result<Patch, DiffError> {
        let schema = self.registry.object(&self.root)?;
        let mut patch_ops = Patch::default();
        let mut path_pos = Spath::default();

        engine::diff_object(
            Some(original),
            Some(modified),
            schema,
            &self.registry,
            &mut path_pos,
            &mut patch_ops,
        )?;

        debug!(root = %self.root, operations = patch_ops.len(), "generated patch");
        Ok(patch_ops)
    }
}

impl TryFrom<SchemaDocument> for PatchGenerator {
    type Error = DiffError;

    fn try_from(document: SchemaDocument) -> Result<Self, Self::Error> {
        let (registry, root) = document.into_registry()?;
        Ok(PatchGenerator { registry, root })
    }
}
