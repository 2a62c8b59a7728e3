mod ext;

use crate::path::{PathError, Segment, Spath};
pub use ext::SerdeValueExt;
use std::ops::Deref;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ResolveError {
    #[error("Invalid path format")]
    InvalidPath(#[from] PathError),

    #[error("Field or item not found")]
    NotFound,

    #[error("Type mismatch encountered during resolution, expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl ResolveError {
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        ResolveError::TypeMismatch {
            expected: expected.to_string(),
            actual: found.to_string(),
        }
    }
}

pub trait ValueAccess<'a> {
    type Out: Deref<Target = serde_json::Value> + 'a;

    fn is_object(&self) -> bool;
    fn is_array(&self) -> bool;

    fn get_key(self, key: &str) -> Option<Self::Out>;
    fn get_index(self, index: usize) -> Option<Self::Out>;
}

impl<'a> ValueAccess<'a> for &'a serde_json::Value {
    type Out = &'a serde_json::Value;

    fn is_object(&self) -> bool {
        serde_json::Value::is_object(self)
    }
    fn is_array(&self) -> bool {
        serde_json::Value::is_array(self)
    }
    fn get_key(self, key: &str) -> Option<Self::Out> {
        self.get(key)
    }
    fn get_index(self, index: usize) -> Option<Self::Out> {
        self.get(index)
    }
}

impl<'a> ValueAccess<'a> for &'a mut serde_json::Value {
    type Out = &'a mut serde_json::Value;

    fn is_object(&self) -> bool {
        serde_json::Value::is_object(self)
    }
    fn is_array(&self) -> bool {
        serde_json::Value::is_array(self)
    }
    fn get_key(self, key: &str) -> Option<Self::Out> {
        self.get_mut(key)
    }
    fn get_index(self, index: usize) -> Option<Self::Out> {
        self.get_mut(index)
    }
}

pub fn resolve_ref<'a>(
    doc: &'a serde_json::Value,
    path: &Spath,
) -> Result<&'a serde_json::Value, ResolveError> {
    resolve_inner(doc, path)
}

pub fn resolve_mut<'a>(
    doc: &'a mut serde_json::Value,
    path: &Spath,
) -> Result<&'a mut serde_json::Value, ResolveError> {
    resolve_inner(doc, path)
}

fn resolve_inner<'a, A>(doc: A, path: &Spath) -> Result<A, ResolveError>
where
    A: ValueAccess<'a, Out = A>, // output type is the same as input type
    A: Deref<Target = serde_json::Value>,
{
    let mut current = doc;
    for segment in path {
        current = resolve_segment(current, segment)?;
    }

    Ok(current)
}

fn resolve_segment<'a, A>(doc: A, segment: &Segment) -> Result<A::Out, ResolveError>
where
    A: ValueAccess<'a>,
    A: Deref<Target = serde_json::Value>,
{
    if doc.is_object() {
        // On objects every segment is a plain member name, "0" and "-" included
        return doc.get_key(&segment.token()).ok_or(ResolveError::NotFound);
    }

    if !doc.is_array() {
        let type_name = value_type_desc(&doc);
        return Err(ResolveError::type_mismatch("object or array", &type_name));
    }

    match segment {
        Segment::Index(index) => doc.get_index(*index).ok_or(ResolveError::NotFound),
        // "-" names an element that does not exist yet
        Segment::Append => Err(ResolveError::NotFound),
        Segment::Field(field) => Err(ResolveError::type_mismatch(
            "number",
            &format!("string({field:?})"),
        )),
    }
}

pub(crate) fn value_type_desc(val: &serde_json::Value) -> String {
    match val {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => format!("boolean({b})"),
        serde_json::Value::Number(n) => format!("number({n})"),
        serde_json::Value::String(s) => format!("string({s:?})"),
        serde_json::Value::Array(_) => "array".to_string(),
        serde_json::Value::Object(_) => "object".to_string(),
    }
}
