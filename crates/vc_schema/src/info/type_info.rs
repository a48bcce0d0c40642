use alloc::boxed::Box;
use core::any::TypeId;

use crate::Reflect;
use crate::info::{ListInfo, OpaqueInfo, OptionalInfo, ScalarInfo, StructInfo, Type};
use crate::ops::ReflectKind;

/// Type information of a supported type.
///
/// Obtained through [`Typed::type_info`](crate::Typed::type_info) or, for a
/// value, [`Reflect::reflect_info`].
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Optional(OptionalInfo),
    Scalar(ScalarInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_as {
    ($name:ident, $variant:ident, $info:ty) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`] if this is a `", stringify!($variant), "`.")]
        #[inline]
        pub fn $name(&self) -> Option<&$info> {
            match self {
                Self::$variant(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    pub fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Scalar(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// The short type name, e.g. `Vec<u8>`.
    #[inline]
    pub fn type_name(&self) -> &str {
        self.ty().name()
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.ty().is::<T>()
    }

    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Creates the zero value of this type.
    pub fn new_default(&self) -> Box<dyn Reflect> {
        match self {
            Self::Struct(info) => info.new_default(),
            Self::List(info) => info.new_default(),
            Self::Optional(info) => info.new_default(),
            Self::Scalar(info) => info.new_default(),
            Self::Opaque(info) => info.new_default(),
        }
    }

    impl_as!(as_struct, Struct, StructInfo);
    impl_as!(as_list, List, ListInfo);
    impl_as!(as_optional, Optional, OptionalInfo);
    impl_as!(as_scalar, Scalar, ScalarInfo);
    impl_as!(as_opaque, Opaque, OpaqueInfo);

    /// Follows optional indirections down to the first non-optional type.
    pub fn pointee(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Self::Optional(optional) = info {
            info = optional.inner_info();
        }
        info
    }

    /// The record reached through optional indirections, if any.
    #[inline]
    pub fn record(&'static self) -> Option<&'static StructInfo> {
        self.pointee().as_struct()
    }
}

#[cfg(test)]
mod tests {
    use crate::Typed;
    use crate::ops::{ReflectKind, ScalarKind};
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn kinds() {
        assert_eq!(u8::type_info().kind(), ReflectKind::Scalar);
        assert_eq!(<Vec<u8>>::type_info().kind(), ReflectKind::List);
        assert_eq!(<Option<u8>>::type_info().kind(), ReflectKind::Optional);
        assert_eq!(core::time::Duration::type_info().kind(), ReflectKind::Opaque);
    }

    #[test]
    fn pointee_skips_options() {
        let info = <Option<Option<Box<String>>>>::type_info();
        let pointee = info.pointee();
        assert!(pointee.is::<String>());
        assert_eq!(pointee.as_scalar().map(|s| s.kind()), Some(ScalarKind::String));
        assert!(info.record().is_none());
    }

    #[test]
    fn list_items() {
        let info = <Vec<Option<i16>>>::type_info().as_list().unwrap();
        assert!(info.item_info().is::<Option<i16>>());
        assert_eq!(info.ty().name(), "Vec<Option<i16>>");
    }
}
