use crate::Reflect;

/// A record with named fields, accessed by declaration index.
///
/// Indices follow [`StructInfo::fields`](crate::info::StructInfo::fields).
pub trait Struct: Reflect {
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn field_len(&self) -> usize;
}
