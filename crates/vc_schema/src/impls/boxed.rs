use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef};

// `Box<T>` forwards everything to `T`.

impl<T: Typed> Typed for Box<T> {
    #[inline]
    fn type_info() -> &'static TypeInfo {
        T::type_info()
    }
}

impl<T: Reflect> Reflect for Box<T> {
    #[inline]
    fn reflect_info(&self) -> &'static TypeInfo {
        (**self).reflect_info()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        (**self).reflect_ref()
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        (**self).reflect_mut()
    }

    #[inline]
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        (**self).set(value)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        (**self).as_reflect()
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        (**self).as_reflect_mut()
    }

    #[inline]
    fn pointee(&self) -> Option<&dyn Reflect> {
        (**self).pointee()
    }

    #[inline]
    fn pointee_mut(&mut self) -> &mut dyn Reflect {
        (**self).pointee_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use alloc::boxed::Box;

    #[test]
    fn set_accepts_inner() {
        let mut b = Box::new(1_u64);
        assert!(b.set(Box::new(5_u64)).is_ok());
        assert_eq!(*b, 5);
        assert!(b.set(Box::new(Box::new(5_u64))).is_err());
        assert!(b.as_reflect_mut().downcast_mut::<u64>().is_some());
    }
}
