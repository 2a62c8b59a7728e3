//! Structural diff of typed object graphs into ordered JSON Patch
//! (RFC 6902) documents.
//!
//! Types declare their diffable fields once with [`diffable!`]; every field is
//! classified as a primitive, a nested object or an ordered list when the
//! type is registered. [`generate`] then walks two values of that type and
//! emits `add`, `remove`, `replace` and `move` operations whose indexes are
//! valid when applied in order, e.g. with [`patch::apply`].
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use structpatch::{PatchOp, diffable, generate};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Playlist {
//!     title: Option<String>,
//!     tracks: Vec<u32>,
//! }
//!
//! diffable! {
//!     Playlist { title: Option<String>, tracks: Vec<u32> }
//! }
//!
//! let before = Playlist { title: Some("Mix".into()), tracks: vec![1, 2, 3] };
//! let after = Playlist { title: Some("Mix".into()), tracks: vec![2, 3, 1] };
//!
//! let patch = generate(&before, &after).unwrap();
//! assert_eq!(
//!     patch.into_inner(),
//!     vec![PatchOp::move_op("/tracks/0".parse().unwrap(), "/tracks/2".parse().unwrap())]
//! );
//! ```

pub mod diff;
pub mod patch;
pub mod path;
pub mod resolve;
pub mod schema;

pub use diff::{DiffError, Patch, PatchGenerator, PatchOp, diff_list, generate};
pub use path::{Segment, Spath};
pub use schema::{FieldKind, SchemaRegistry, Shape};
