use crate::{path::Spath, schema::SchemaError};

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum DiffError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Value at {path} does not match the declared shape, expected {expected}, found {actual}")]
    ShapeMismatch {
        path: Spath,
        expected: &'static str,
        actual: String,
    },

    #[error("Object at {path} has member '{field}' that its type does not declare")]
    UndeclaredField { path: Spath, field: String },

    #[error("Failed to serialize value: {message}")]
    Serialization { message: String },
}

impl DiffError {
    pub fn shape_mismatch(path: &Spath, expected: &'static str, actual: &serde_json::Value) -> Self {
        DiffError::ShapeMismatch {
            path: path.clone(),
            expected,
            actual: crate::resolve::value_type_desc(actual),
        }
    }

    pub fn undeclared_field(path: &Spath, field: &str) -> Self {
        DiffError::UndeclaredField {
            path: path.clone(),
            field: field.to_string(),
        }
    }
}

impl From<serde_json::Error> for DiffError {
    fn from(err: serde_json::Error) -> Self {
        DiffError::Serialization {
            message: err.to_string(),
        }
    }
}
