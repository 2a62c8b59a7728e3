use crate::{
    diff::PatchOp,
    patch::{PatchError, apply},
    path::Spath,
};

use super::{ResolveError, resolve_ref};

pub trait SerdeValueExt {
    fn get_value_at(&self, path: &str) -> Result<&serde_json::Value, ResolveError>;
    fn apply_patch(&self, patch: &[PatchOp]) -> Result<serde_json::Value, PatchError>;
}

impl SerdeValueExt for serde_json::Value {
    fn get_value_at(&self, path: &str) -> Result<&serde_json::Value, ResolveError> {
        let spath = Spath::try_from(path)?;

        resolve_ref(self, &spath)
    }

    fn apply_patch(&self, patch: &[PatchOp]) -> Result<serde_json::Value, PatchError> {
        apply(self, patch)
    }
}
