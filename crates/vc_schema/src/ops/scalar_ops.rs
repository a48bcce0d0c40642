use alloc::string::String;
use core::fmt;

use crate::Reflect;

/// The primitive kinds known to the built-in conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
}

impl ScalarKind {
    /// Whether this is an integer or floating point kind.
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Bool | Self::String)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "String",
        };
        f.pad(name)
    }
}

/// A primitive value, tagged with its exact kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
}

impl Primitive {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::Isize(_) => ScalarKind::Isize,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::Usize(_) => ScalarKind::Usize,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::String(_) => ScalarKind::String,
        }
    }

    /// Whether this is the zero value of its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(v) => !v,
            Self::I8(v) => *v == 0,
            Self::I16(v) => *v == 0,
            Self::I32(v) => *v == 0,
            Self::I64(v) => *v == 0,
            Self::Isize(v) => *v == 0,
            Self::U8(v) => *v == 0,
            Self::U16(v) => *v == 0,
            Self::U32(v) => *v == 0,
            Self::U64(v) => *v == 0,
            Self::Usize(v) => *v == 0,
            Self::F32(v) => *v == 0.0,
            Self::F64(v) => *v == 0.0,
            Self::String(v) => v.is_empty(),
        }
    }
}

/// Formats the value the way the encoder writes it.
impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::I8(v) => fmt::Display::fmt(v, f),
            Self::I16(v) => fmt::Display::fmt(v, f),
            Self::I32(v) => fmt::Display::fmt(v, f),
            Self::I64(v) => fmt::Display::fmt(v, f),
            Self::Isize(v) => fmt::Display::fmt(v, f),
            Self::U8(v) => fmt::Display::fmt(v, f),
            Self::U16(v) => fmt::Display::fmt(v, f),
            Self::U32(v) => fmt::Display::fmt(v, f),
            Self::U64(v) => fmt::Display::fmt(v, f),
            Self::Usize(v) => fmt::Display::fmt(v, f),
            Self::F32(v) => fmt::Display::fmt(v, f),
            Self::F64(v) => fmt::Display::fmt(v, f),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// A value converted through the built-in primitive table.
///
/// Implemented by the primitives themselves and by single-field newtypes
/// deriving [`Schema`](crate::Schema), which delegate to their inner value.
pub trait Scalar: Reflect {
    /// The static kind of `Self`.
    fn kind() -> ScalarKind
    where
        Self: Sized;

    fn scalar_kind(&self) -> ScalarKind;

    fn primitive(&self) -> Primitive;

    /// Stores `value`, handing it back if its kind does not match.
    fn set_primitive(&mut self, value: Primitive) -> Result<(), Primitive>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display() {
        assert_eq!(Primitive::Bool(true).to_string(), "true");
        assert_eq!(Primitive::I64(-7).to_string(), "-7");
        assert_eq!(Primitive::F64(1.618).to_string(), "1.618");
        assert_eq!(Primitive::F32(0.1).to_string(), "0.1");
        assert_eq!(Primitive::String("a b".into()).to_string(), "a b");
    }

    #[test]
    fn zero() {
        assert!(Primitive::Bool(false).is_zero());
        assert!(Primitive::U16(0).is_zero());
        assert!(Primitive::F64(0.0).is_zero());
        assert!(Primitive::String(String::new()).is_zero());
        assert!(!Primitive::I8(1).is_zero());
    }

    #[test]
    fn kinds() {
        assert_eq!(Primitive::Usize(3).kind(), ScalarKind::Usize);
        assert!(ScalarKind::F32.is_numeric());
        assert!(!ScalarKind::String.is_numeric());
        assert_eq!(ScalarKind::String.to_string(), "String");
    }
}
