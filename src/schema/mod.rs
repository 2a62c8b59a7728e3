//! Field descriptors of diffable types.
//!
//! Every record type declares `{name, type}` pairs once, through [`Shape`]
//! (usually via [`diffable!`](crate::diffable)). Registration classifies each
//! field into a [`FieldKind`] so that diffing never inspects types at runtime.

mod classify;
mod error;
mod macros;
mod registry;
mod shape;

pub use classify::{FieldKind, classify};
pub use error::{ClassificationError, SchemaError};
pub use registry::{FieldSchema, ObjectSchema, SchemaDocument, SchemaRegistry};
pub use shape::{Capabilities, FieldDecl, Shape, TypeShape};
