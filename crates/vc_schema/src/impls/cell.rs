//! Containers for static storage of type information.
//!
//! For non-generic types, a [`NonGenericTypeInfoCell`] wraps a [`OnceLock`].
//!
//! For generic types the `static CELL` inside `type_info` is shared by every
//! instantiation, so a [`GenericTypeInfoCell`] keeps one leaked entry per
//! [`TypeId`] behind a [`RwLock`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::{TypeIdMap, new_map};
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Static storage of the [`TypeInfo`] of one non-generic type.
///
/// ## Example
///
/// ```
/// use vc_schema::impls::NonGenericTypeInfoCell;
/// use vc_schema::info::{OpaqueInfo, TypeInfo};
///
/// fn duration_info() -> &'static TypeInfo {
///     static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///     CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<core::time::Duration>()))
/// }
///
/// assert!(core::ptr::eq(duration_info(), duration_info()));
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored information, building it with `f` on first use.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Static storage of the [`TypeInfo`] of every instantiation of a generic
/// type.
///
/// ## Example
///
/// ```
/// use vc_schema::Reflect;
/// use vc_schema::impls::GenericTypeInfoCell;
/// use vc_schema::info::{ListInfo, TypeInfo, Typed};
///
/// fn vec_info<T: Typed>() -> &'static TypeInfo
/// where
///     Vec<T>: Reflect + Default,
/// {
///     static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///     CELL.get_or_insert::<Vec<T>>(|| TypeInfo::List(ListInfo::new::<Vec<T>, T>()))
/// }
///
/// assert!(vec_info::<u8>().is::<Vec<u8>>());
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(new_map()))
    }

    /// Returns the information stored for `G`, building it with `f` on
    /// first use.
    ///
    /// `f` runs without holding the lock, so it may request the information
    /// of other instantiations.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();

        match found {
            Some(info) => info,
            None => {
                let info = f();
                *self
                    .0
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entry(type_id)
                    .or_insert_with(|| Box::leak(Box::new(info)))
            }
        }
    }
}
