use serde_json::Value;

use crate::{
    patch::error::PatchError,
    path::{Segment, Spath},
    resolve::{resolve_mut, value_type_desc},
};

/// The "add" operation performs one of the following functions,
/// depending upon what the target location references:
///
/// o  If the target location specifies an array index, a new value is
///     inserted into the array at the specified index.
///
/// o  If the target location specifies an object member that does not
///     already exist, a new member is added to the object.
///
/// o  If the target location specifies an object member that does exist,
///    that member's value is replaced.
///
/// Any array elements at or above the specified index are shifted one
/// position to the right.  The specified index MUST NOT be greater than
/// the number of elements in the array.  If the "-" character is used to
/// index the end of the array, this has the effect of appending the value
/// to the array.
///
/// The object or array that will contain the value must exist.
pub fn add(doc: &mut Value, path: Spath, value: Value) -> Result<(), PatchError> {
    // The empty path targets the whole document
    let (Some(parent), Some(segment)) = (path.parent(), path.last_segment()) else {
        *doc = value;
        return Ok(());
    };

    let target = resolve_mut(doc, &parent)?;

    match target {
        Value::Object(obj) => {
            obj.insert(segment.token().into_owned(), value);
        }
        Value::Array(arr) => match segment {
            Segment::Append => arr.push(value),
            Segment::Index(index) => {
                // Index may equal the length, which appends
                if *index > arr.len() {
                    return Err(PatchError::index_out_of_bounds(&path, *index, arr.len()));
                }
                arr.insert(*index, value);
            }
            Segment::Field(field) => {
                return Err(PatchError::invalid_array_index_token(&path, field));
            }
        },
        val => {
            return Err(PatchError::not_a_container(&parent, &value_type_desc(val)));
        }
    }

    Ok(())
}
