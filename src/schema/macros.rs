/// Declares the diffable field list of one or more record types.
///
/// Each field is written `name: Type`, or `name as "wireName": Type` when the
/// serialized member name differs from the Rust field name (serde renames).
/// Field order is the order fields are diffed in.
///
/// ```
/// use serde::Serialize;
/// use structpatch::diffable;
///
/// #[derive(Serialize)]
/// struct Address {
///     street: String,
/// }
///
/// #[derive(Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Customer {
///     full_name: String,
///     home: Option<Address>,
///     tags: Vec<String>,
/// }
///
/// diffable! {
///     Address { street: String }
///     Customer {
///         full_name as "fullName": String,
///         home: Option<Address>,
///         tags: Vec<String>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! diffable {
    (@wire $field:ident) => {
        ::core::stringify!($field)
    };
    (@wire $field:ident $wire:literal) => {
        $wire
    };
    ($($ty:ident { $($field:ident $(as $wire:literal)? : $fty:ty),* $(,)? })+) => {
        $(
            impl $crate::schema::Shape for $ty {
                fn shape() -> $crate::schema::TypeShape {
                    $crate::schema::TypeShape::record(::std::any::type_name::<$ty>(), || {
                        ::std::vec![
                            $($crate::schema::FieldDecl::of::<$fty>(
                                $crate::diffable!(@wire $field $($wire)?)
                            )),*
                        ]
                    })
                }
            }
        )+
    };
}
