use super::Capabilities;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ClassificationError {
    #[error("Type {type_name} has conflicting capabilities {capabilities:?}")]
    Conflicting {
        type_name: String,
        capabilities: Capabilities,
    },

    #[error("Type {type_name} is neither a scalar, an ordered list nor a record")]
    Unclassifiable { type_name: String },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum SchemaError {
    #[error("Cannot classify field '{field}' of {owner}: {source}")]
    Classification {
        owner: String,
        field: String,
        source: ClassificationError,
    },

    #[error("Type {type_name} is not registered")]
    UnknownType { type_name: String },

    #[error("Type {type_name} is not a record and cannot be diffed field by field")]
    NotAnObject { type_name: String },

    #[error("Type {type_name} declares field '{field}' more than once")]
    DuplicateField { type_name: String, field: String },

    #[error("Type {type_name} is declared more than once")]
    DuplicateType { type_name: String },

    #[error("Complex field '{field}' of {type_name} does not name its type")]
    MissingTypeReference { type_name: String, field: String },
}

impl SchemaError {
    pub fn classification(owner: &str, field: &str, source: ClassificationError) -> Self {
        SchemaError::Classification {
            owner: owner.to_string(),
            field: field.to_string(),
            source,
        }
    }

    pub fn unknown_type(type_name: &str) -> Self {
        SchemaError::UnknownType {
            type_name: type_name.to_string(),
        }
    }
}
