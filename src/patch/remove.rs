use serde_json::Value;

use crate::{
    patch::error::PatchError,
    path::{Segment, Spath},
    resolve::{resolve_mut, value_type_desc},
};

/// The "remove" operation removes the value at the target location.
///
/// The target location MUST exist for the operation to be successful.
///
/// For example:
///
/// { "op": "remove", "path": "/a/b/c" }
///
/// If removing an element from an array, any elements above the
/// specified index are shifted one position to the left.
pub fn remove(doc: &mut Value, path: Spath) -> Result<Value, PatchError> {
    let (Some(parent), Some(segment)) = (path.parent(), path.last_segment()) else {
        return Err(PatchError::CannotRemoveRoot);
    };

    let target = resolve_mut(doc, &parent)?;

    match target {
        Value::Object(map) => map
            .remove(&*segment.token())
            .ok_or_else(|| PatchError::target_not_found(&path)),
        Value::Array(arr) => {
            let index = match segment {
                Segment::Index(index) => *index,
                Segment::Append => return Err(PatchError::invalid_array_index_token(&path, "-")),
                Segment::Field(field) => {
                    return Err(PatchError::invalid_array_index_token(&path, field));
                }
            };

            if index >= arr.len() {
                return Err(PatchError::index_out_of_bounds(&path, index, arr.len()));
            }
            Ok(arr.remove(index))
        }
        val => Err(PatchError::not_a_container(&parent, &value_type_desc(val))),
    }
}
