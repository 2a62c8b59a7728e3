use serde::{Deserialize, Serialize};

use super::{Capabilities, TypeShape, error::ClassificationError};

/// How the diff engine treats a field, fixed by the field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Compared by value and replaced as a whole.
    Primitive,
    /// Walked field by field.
    ComplexObject,
    /// Diffed element-wise by value identity.
    OrderedList,
}

/// Places a declared type into exactly one [`FieldKind`].
///
/// Text is always primitive even though it is also a sequence of characters.
pub fn classify(shape: &TypeShape) -> Result<FieldKind, ClassificationError> {
    let Capabilities {
        scalar,
        text,
        sequence,
        record,
    } = shape.capabilities;

    if text {
        return Ok(FieldKind::Primitive);
    }

    match (scalar, sequence, record) {
        (true, false, false) => Ok(FieldKind::Primitive),
        (false, true, false) => Ok(FieldKind::OrderedList),
        (false, false, true) => Ok(FieldKind::ComplexObject),
        (false, false, false) => Err(ClassificationError::Unclassifiable {
            type_name: shape.type_name.to_string(),
        }),
        _ => Err(ClassificationError::Conflicting {
            type_name: shape.type_name.to_string(),
            capabilities: shape.capabilities,
        }),
    }
}
