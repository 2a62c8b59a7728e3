mod add;
mod error;
mod move_op;
mod remove;
mod replace;

pub use add::add;
pub use error::PatchError;
pub use move_op::move_op;
pub use remove::remove;
pub use replace::replace;
use serde_json::Value;
use tracing::debug;

use crate::diff::PatchOp;

/// Applies `patch` to a copy of `doc`, strictly in document order.
///
/// The first failing operation aborts the whole patch; `doc` itself is never
/// modified.
pub fn apply(doc: &Value, patch: &[PatchOp]) -> Result<Value, PatchError> {
    let mut doc = doc.clone();
    for (index, op) in patch.iter().enumerate() {
        let result = match op {
            PatchOp::Add { path, value } => add(&mut doc, path.clone(), value.clone()),
            PatchOp::Remove { path } => remove(&mut doc, path.clone()).map(|_| ()),
            PatchOp::Replace { path, value } => replace(&mut doc, path.clone(), value.clone()),
            PatchOp::Move { from, path } => move_op(&mut doc, from.clone(), path.clone()),
        };

        result.map_err(|e| {
            debug!(index, op = op.name(), path = %op.path(), error = %e, "patch operation failed");
            PatchError::OperationFailed {
                index,
                op: op.name(),
                source: Box::new(e),
            }
        })?;
    }

    Ok(doc)
}
