use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::{List, ReflectMut, ReflectRef};

impl<T: Reflect + Typed + Default> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Vec<T> {
    #[inline]
    fn reflect_info(&self) -> &'static TypeInfo {
        <Self as Typed>::type_info()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }

    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }

    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    #[inline]
    fn pointee_mut(&mut self) -> &mut dyn Reflect {
        self
    }
}

impl<T: Reflect + Typed + Default> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|v| v as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|v| v as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Vec::push(self, value.take::<T>()?);
        Ok(())
    }

    fn grow(&mut self, len: usize) {
        if len > Vec::len(self) {
            self.resize_with(len, T::default);
        }
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use crate::ops::List;
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn grow_never_shrinks() {
        let mut v = vec![7_i32, 8];
        List::grow(&mut v, 4);
        assert_eq!(v, [7, 8, 0, 0]);
        List::grow(&mut v, 1);
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn push_checks_item_type() {
        let mut v: Vec<u8> = Vec::new();
        assert!(List::push(&mut v, Box::new(3_u8)).is_ok());
        assert!(List::push(&mut v, Box::new(3_i8)).is_err());
        assert_eq!(v, [3]);
        assert_eq!(List::get(&v, 0).and_then(|x| x.downcast_ref::<u8>()), Some(&3));
        assert!(List::get(&v, 1).is_none());
    }
}
