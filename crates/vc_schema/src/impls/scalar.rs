use alloc::boxed::Box;
use alloc::string::String;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ScalarInfo, TypeInfo, Typed};
use crate::ops::{Primitive, ReflectMut, ReflectRef, Scalar, ScalarKind};

/// The `Reflect` body shared by every scalar.
macro_rules! scalar_reflect_body {
    () => {
        #[inline]
        fn reflect_info(&self) -> &'static TypeInfo {
            <Self as Typed>::type_info()
        }

        #[inline]
        fn reflect_ref(&self) -> ReflectRef<'_> {
            ReflectRef::Scalar(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> ReflectMut<'_> {
            ReflectMut::Scalar(self)
        }

        fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn is_zero(&self) -> bool {
            *self == <Self as Default>::default()
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
    };
}

macro_rules! impl_typed_scalar {
    ($ty:ty) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
            }
        }
    };
}

macro_rules! impl_copy_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl_typed_scalar!($ty);

        impl Reflect for $ty {
            scalar_reflect_body!();
        }

        impl Scalar for $ty {
            #[inline]
            fn kind() -> ScalarKind {
                ScalarKind::$variant
            }

            #[inline]
            fn scalar_kind(&self) -> ScalarKind {
                ScalarKind::$variant
            }

            #[inline]
            fn primitive(&self) -> Primitive {
                Primitive::$variant(*self)
            }

            fn set_primitive(&mut self, value: Primitive) -> Result<(), Primitive> {
                match value {
                    Primitive::$variant(v) => {
                        *self = v;
                        Ok(())
                    }
                    other => Err(other),
                }
            }
        }
    )*};
}

impl_copy_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl_typed_scalar!(String);

impl Reflect for String {
    scalar_reflect_body!();
}

impl Scalar for String {
    #[inline]
    fn kind() -> ScalarKind {
        ScalarKind::String
    }

    #[inline]
    fn scalar_kind(&self) -> ScalarKind {
        ScalarKind::String
    }

    #[inline]
    fn primitive(&self) -> Primitive {
        Primitive::String(self.clone())
    }

    fn set_primitive(&mut self, value: Primitive) -> Result<(), Primitive> {
        match value {
            Primitive::String(v) => {
                *self = v;
                Ok(())
            }
            other => Err(other),
        }
    }
}
