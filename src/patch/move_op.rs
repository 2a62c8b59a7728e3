use serde_json::Value;

use crate::{
    patch::{add, error::PatchError, remove},
    path::Spath,
};

/// The "move" operation removes the value at a specified location and
/// adds it to the target location.
///
/// The "from" location MUST exist for the operation to be successful.
///
/// For example:
///
/// { "op": "move", "from": "/a/b/c", "path": "/a/b/d" }
///
/// This operation is functionally identical to a "remove" operation on
/// the "from" location, followed immediately by an "add" operation at
/// the target location with the value that was just removed. Within one
/// array the target index is therefore read after the removal.
///
/// The "from" location MUST NOT be a proper prefix of the "path"
/// location; i.e., a location cannot be moved into one of its children.
pub fn move_op(doc: &mut Value, from: Spath, path: Spath) -> Result<(), PatchError> {
    if from == path {
        // Still has to exist
        crate::resolve::resolve_ref(doc, &from)?;
        return Ok(());
    }

    if from.is_empty() || from.is_parent_of(&path) {
        return Err(PatchError::CannotMoveIntoChild);
    }

    // Work on a copy so a failing add leaves the document untouched
    let mut doc_cloned = doc.clone();

    let value = remove(&mut doc_cloned, from)?;
    add(&mut doc_cloned, path, value)?;

    *doc = doc_cloned;

    Ok(())
}
