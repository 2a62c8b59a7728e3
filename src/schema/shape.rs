use std::{
    collections::VecDeque,
    rc::Rc,
    sync::Arc,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

/// What a declared type is able to do, independent of any instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    /// Holds a single value (numbers, booleans, timestamps, ...).
    pub scalar: bool,
    /// Textual value. Text also reports `sequence` (of characters).
    pub text: bool,
    /// Indexable, insertion-ordered collection supporting membership tests.
    pub sequence: bool,
    /// Aggregate with named fields.
    pub record: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        scalar: false,
        text: false,
        sequence: false,
        record: false,
    };
    pub const SCALAR: Capabilities = Capabilities {
        scalar: true,
        ..Capabilities::NONE
    };
    pub const TEXT: Capabilities = Capabilities {
        text: true,
        sequence: true,
        ..Capabilities::NONE
    };
    pub const SEQUENCE: Capabilities = Capabilities {
        sequence: true,
        ..Capabilities::NONE
    };
    pub const RECORD: Capabilities = Capabilities {
        record: true,
        ..Capabilities::NONE
    };

    pub const fn union(self, other: Capabilities) -> Capabilities {
        Capabilities {
            scalar: self.scalar || other.scalar,
            text: self.text || other.text,
            sequence: self.sequence || other.sequence,
            record: self.record || other.record,
        }
    }
}

/// A field as declared on a record type.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    /// Member name in the serialized form.
    pub name: &'static str,
    pub shape: fn() -> TypeShape,
}

impl FieldDecl {
    pub fn of<T: Shape + ?Sized>(name: &'static str) -> Self {
        FieldDecl {
            name,
            shape: T::shape,
        }
    }
}

/// Static description of a declared type.
///
/// Record fields are produced lazily so that self-referential types can be
/// described without recursing forever.
#[derive(Debug, Clone, Copy)]
pub struct TypeShape {
    pub type_name: &'static str,
    pub capabilities: Capabilities,
    fields: fn() -> Vec<FieldDecl>,
}

impl TypeShape {
    pub fn new(type_name: &'static str, capabilities: Capabilities) -> Self {
        TypeShape {
            type_name,
            capabilities,
            fields: Vec::new,
        }
    }

    pub fn scalar(type_name: &'static str) -> Self {
        TypeShape::new(type_name, Capabilities::SCALAR)
    }

    pub fn sequence(type_name: &'static str) -> Self {
        TypeShape::new(type_name, Capabilities::SEQUENCE)
    }

    pub fn record(type_name: &'static str, fields: fn() -> Vec<FieldDecl>) -> Self {
        TypeShape {
            type_name,
            capabilities: Capabilities::RECORD,
            fields,
        }
    }

    /// Same shape with extra capabilities.
    pub fn with(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = self.capabilities.union(capabilities);
        self
    }

    pub fn fields(&self) -> Vec<FieldDecl> {
        (self.fields)()
    }
}

/// Types that can take part in a structural diff.
///
/// Implemented for std scalars, strings, ordered sequences and transparent
/// wrappers. Record types implement it through [`diffable!`](crate::diffable)
/// or by hand.
pub trait Shape {
    fn shape() -> TypeShape;
}

macro_rules! impl_scalar_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Shape for $ty {
                fn shape() -> TypeShape {
                    TypeShape::scalar(stringify!($ty))
                }
            }
        )*
    };
}

impl_scalar_shape!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    Duration, SystemTime,
);

impl Shape for String {
    fn shape() -> TypeShape {
        TypeShape::new("String", Capabilities::TEXT)
    }
}

impl Shape for str {
    fn shape() -> TypeShape {
        TypeShape::new("str", Capabilities::TEXT)
    }
}

impl<T: Shape + ?Sized> Shape for &T {
    fn shape() -> TypeShape {
        T::shape()
    }
}

// `None` serializes as null, which is how absence is expressed
impl<T: Shape> Shape for Option<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: Shape + ?Sized> Shape for Box<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: Shape + ?Sized> Shape for Rc<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: Shape + ?Sized> Shape for Arc<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T> Shape for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence("Vec")
    }
}

impl<T> Shape for VecDeque<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence("VecDeque")
    }
}

impl<T> Shape for [T] {
    fn shape() -> TypeShape {
        TypeShape::sequence("slice")
    }
}

impl<T, const N: usize> Shape for [T; N] {
    fn shape() -> TypeShape {
        TypeShape::sequence("array")
    }
}
