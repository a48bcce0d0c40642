use crate::info::TypeInfo;

/// A static accessor to type information.
///
/// Implemented by [`#[derive(Schema)]`](crate::Schema) and by the built-in
/// implementations in [`impls`](crate::impls).
///
/// # Manually Impl
///
/// Use [`NonGenericTypeInfoCell`] or [`GenericTypeInfoCell`] to build the
/// information once.
///
/// ```
/// use vc_schema::info::{FieldInfo, StructInfo, TypeInfo, Typed};
/// use vc_schema::impls::NonGenericTypeInfoCell;
/// # use vc_schema::Schema;
/// # #[derive(Default, Schema)]
/// # #[schema(typed = false)]
/// # struct Point { x: i32, y: i32 }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Struct(StructInfo::new::<Self>(&[
///                 FieldInfo::new::<i32>("x"),
///                 FieldInfo::new::<i32>("y"),
///             ]))
///         })
///     }
/// }
///
/// assert_eq!(Point::type_info().as_struct().unwrap().field_len(), 2);
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: 'static {
    /// Returns the static type information of `Self`.
    fn type_info() -> &'static TypeInfo;
}
