use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::TypeInfo;
use crate::ops::{ReflectKind, ReflectMut, ReflectRef};

/// Dynamic access to a value whose shape is described by a [`TypeInfo`].
///
/// Implemented by [`#[derive(Schema)]`](crate::Schema) for user types and by
/// [`impls`](crate::impls) for primitives, `String`, `Option<T>`, `Vec<T>`
/// and `Box<T>`.
///
/// `Box<T>` is transparent: it reports the information of `T` and accepts a
/// `T` in [`set`](Reflect::set).
///
/// # Manually Impl
///
/// Every method has a direct implementation for a given kind:
///
/// ```ignore
/// fn reflect_info(&self) -> &'static TypeInfo {
///     <Self as Typed>::type_info()
/// }
///
/// fn reflect_ref(&self) -> ReflectRef<'_> {
///     ReflectRef::Kind(self)  // e.g. ReflectRef::Struct
/// }
///
/// fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
///     *self = value.take::<Self>()?;
///     Ok(())
/// }
///
/// fn as_reflect(&self) -> &dyn Reflect {
///     self
/// }
///
/// fn pointee(&self) -> Option<&dyn Reflect> {
///     Some(self)
/// }
/// ```
pub trait Reflect: Any + Send + Sync {
    /// Returns the static type information of the underlying type.
    fn reflect_info(&self) -> &'static TypeInfo;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Replaces the value with `value`, handing it back if the types differ.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Whether the value is the zero value of its type.
    ///
    /// Null optionals and empty lists are zero; records are zero when every
    /// field is.
    fn is_zero(&self) -> bool;

    /// Returns the value itself as a trait object, looking through `Box`.
    fn as_reflect(&self) -> &dyn Reflect;

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Walks through optional indirections and returns the first
    /// non-optional value, or `None` when a null one is met.
    fn pointee(&self) -> Option<&dyn Reflect>;

    /// Walks through optional indirections, allocating zero values for null
    /// ones, and returns the first non-optional value.
    fn pointee_mut(&mut self) -> &mut dyn Reflect;

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_ref().kind()
    }
}

impl dyn Reflect {
    /// The [`TypeId`] of the underlying type.
    ///
    /// For a transparent `Box<T>` this is the id of `T`.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        self.reflect_info().type_id()
    }

    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_schema::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(10_i32);
    /// assert!(x.is::<i32>());
    /// assert!(!x.is::<u32>());
    /// ```
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        <dyn Any>::is::<T>(self)
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Moves the value out as a `T`, handing the box back if it holds
    /// another type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_schema::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(String::from("a"));
    /// let x = x.take::<u8>().unwrap_err();
    /// assert_eq!(x.take::<String>().unwrap(), "a");
    /// ```
    pub fn take<T: Any + Default>(mut self: Box<Self>) -> Result<T, Box<dyn Reflect>> {
        match self.downcast_mut::<T>() {
            Some(value) => Ok(core::mem::take(value)),
            None => Err(self),
        }
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_info().type_name())
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::ops::{ReflectKind, ReflectMut};
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn set_checks_type() {
        let mut x = 1_u32;
        assert!(x.set(Box::new(7_u32)).is_ok());
        assert_eq!(x, 7);

        let back = x.set(Box::new(String::from("7"))).unwrap_err();
        assert!(back.is::<String>());
        assert_eq!(x, 7);
    }

    #[test]
    fn pointee_allocates() {
        let mut x: Option<Option<u8>> = None;
        let inner = x.pointee_mut();
        assert_eq!(inner.reflect_kind(), ReflectKind::Scalar);
        if let ReflectMut::Scalar(s) = inner.reflect_mut() {
            s.set_primitive(crate::ops::Primitive::U8(4)).unwrap();
        }
        assert_eq!(x, Some(Some(4)));
    }

    #[test]
    fn boxes_are_transparent() {
        let boxed: Box<dyn Reflect> = Box::new(Box::new(3_u16));
        assert!(boxed.reflect_info().is::<u16>());
        assert!(boxed.as_reflect().is::<u16>());
        assert_eq!(boxed.pointee().and_then(|v| v.downcast_ref::<u16>()), Some(&3));
    }

    #[test]
    fn zero_values() {
        assert!(0_i64.is_zero());
        assert!(String::new().is_zero());
        assert!(<Option<u8>>::None.is_zero());
        assert!(!Some(0_u8).is_zero());
        assert!(Vec::<u8>::new().is_zero());
        assert!(!vec![0_u8].is_zero());
    }

    #[test]
    fn debug_names_type() {
        let x: Box<dyn Reflect> = Box::new(vec![1_u8]);
        assert_eq!(alloc::format!("{x:?}"), "Reflect(Vec<u8>)");
    }
}
