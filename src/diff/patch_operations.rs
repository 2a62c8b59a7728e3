use serde::{Deserialize, Serialize};

use crate::path::Spath;

/// One atomic change, in the RFC 6902 wire shape
/// (`{"op": "add", "path": "/a", "value": 1}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Add {
        path: Spath,
        value: serde_json::Value,
    },
    Remove {
        path: Spath,
    },
    Replace {
        path: Spath,
        value: serde_json::Value,
    },
    Move {
        from: Spath,
        path: Spath,
    },
}

impl PatchOp {
    pub fn replace(path: Spath, value: serde_json::Value) -> Self {
        PatchOp::Replace { path, value }
    }

    pub fn remove(path: Spath) -> Self {
        PatchOp::Remove { path }
    }

    pub fn add(path: Spath, value: serde_json::Value) -> Self {
        PatchOp::Add { path, value }
    }

    pub fn move_op(from: Spath, path: Spath) -> Self {
        PatchOp::Move { from, path }
    }

    /// The `op` member of the wire form.
    pub fn name(&self) -> &'static str {
        match self {
            PatchOp::Add { .. } => "add",
            PatchOp::Remove { .. } => "remove",
            PatchOp::Replace { .. } => "replace",
            PatchOp::Move { .. } => "move",
        }
    }

    /// Target location; for a move, the destination.
    pub fn path(&self) -> &Spath {
        match self {
            PatchOp::Add { path, .. }
            | PatchOp::Remove { path }
            | PatchOp::Replace { path, .. }
            | PatchOp::Move { path, .. } => path,
        }
    }
}
