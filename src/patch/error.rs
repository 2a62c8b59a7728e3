use crate::path::Spath;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum PatchError {
    #[error("Failed to resolve path: {0}")]
    ResolveError(#[from] crate::resolve::ResolveError),

    #[error("Cannot remove the root of the document")]
    CannotRemoveRoot,

    #[error("Cannot move a value into one of its own children")]
    CannotMoveIntoChild,

    #[error("Target {path} does not exist")]
    TargetNotFound { path: Spath },

    #[error("Token '{token}' in {path} is not a valid array index")]
    InvalidArrayIndexToken { path: Spath, token: String },

    #[error("Index {index} in {path} is out of bounds for an array of length {len}")]
    ArrayIndexOutOfBounds { path: Spath, index: usize, len: usize },

    #[error("Parent {parent} is not an object or array, found {actual}")]
    NotAContainer { parent: Spath, actual: String },

    #[error("Operation #{index} ({op}) failed: {source}")]
    OperationFailed {
        index: usize,
        op: &'static str,
        source: Box<PatchError>,
    },
}

impl PatchError {
    pub fn target_not_found(path: &Spath) -> Self {
        PatchError::TargetNotFound { path: path.clone() }
    }

    pub fn invalid_array_index_token(path: &Spath, token: &str) -> Self {
        PatchError::InvalidArrayIndexToken {
            path: path.clone(),
            token: token.to_string(),
        }
    }

    pub fn index_out_of_bounds(path: &Spath, index: usize, len: usize) -> Self {
        PatchError::ArrayIndexOutOfBounds {
            path: path.clone(),
            index,
            len,
        }
    }

    pub fn not_a_container(parent: &Spath, actual: &str) -> Self {
        PatchError::NotAContainer {
            parent: parent.clone(),
            actual: actual.to_string(),
        }
    }
}
