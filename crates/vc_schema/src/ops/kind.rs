use core::fmt;

use crate::Reflect;
use crate::ops::{List, Optional, Scalar, Struct};

/// The kind of a reflected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Optional,
    Scalar,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Optional => f.pad("Optional"),
            Self::Scalar => f.pad("Scalar"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// An immutable, kind-specific view of a reflected value.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Optional(&'a dyn Optional),
    Scalar(&'a dyn Scalar),
    Opaque(&'a dyn Reflect),
}

/// A mutable, kind-specific view of a reflected value.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Optional(&'a mut dyn Optional),
    Scalar(&'a mut dyn Scalar),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectRef<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

impl ReflectMut<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
