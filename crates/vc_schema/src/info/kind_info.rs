use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt::Display;
use core::str::FromStr;

use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed};
use crate::ops::{Scalar, ScalarKind};

/// Boxes the zero value of `T`.
pub(super) fn new_default<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

// -----------------------------------------------------------------------------
// ListInfo

/// Type information of a growable list such as `Vec<T>`.
#[derive(Debug, Clone)]
pub struct ListInfo {
    ty: Type,
    default: fn() -> Box<dyn Reflect>,
    item_info: fn() -> &'static TypeInfo,
}

impl ListInfo {
    pub fn new<L: Reflect + Default, T: Typed>() -> Self {
        Self {
            ty: Type::of::<L>(),
            default: new_default::<L>,
            item_info: T::type_info,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Type information of the list items.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub fn new_default(&self) -> Box<dyn Reflect> {
        (self.default)()
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// Type information of a nullable indirection such as `Option<T>`.
///
/// Nullable values play the role of pointers: they are allocated with the
/// zero value of the pointee when a path walks through them.
#[derive(Debug, Clone)]
pub struct OptionalInfo {
    ty: Type,
    default: fn() -> Box<dyn Reflect>,
    inner_info: fn() -> &'static TypeInfo,
}

impl OptionalInfo {
    pub fn new<O: Reflect + Default, T: Typed>() -> Self {
        Self {
            ty: Type::of::<O>(),
            default: new_default::<O>,
            inner_info: T::type_info,
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Type information of the pointee.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }

    #[inline]
    pub fn new_default(&self) -> Box<dyn Reflect> {
        (self.default)()
    }
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Type information of a primitive, or of a newtype over one.
#[derive(Debug, Clone)]
pub struct ScalarInfo {
    ty: Type,
    default: fn() -> Box<dyn Reflect>,
    kind: ScalarKind,
}

impl ScalarInfo {
    pub fn new<T: Scalar + Default>() -> Self {
        Self {
            ty: Type::of::<T>(),
            default: new_default::<T>,
            kind: T::kind(),
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The primitive kind used by the built-in conversions.
    #[inline]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    #[inline]
    pub fn new_default(&self) -> Box<dyn Reflect> {
        (self.default)()
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Type information of a leaf that is converted as a whole.
///
/// Without a [`TextCodec`] the type can only be converted through a
/// registered converter or encoder.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
    default: fn() -> Box<dyn Reflect>,
    text: Option<TextCodec>,
}

impl OpaqueInfo {
    pub fn new<T: Reflect + Default>() -> Self {
        Self {
            ty: Type::of::<T>(),
            default: new_default::<T>,
            text: None,
        }
    }

    /// Attaches the text codec of `T`.
    pub fn with_text<T>(mut self) -> Self
    where
        T: Reflect + FromStr + Display,
        T::Err: Display,
    {
        self.text = Some(TextCodec::of::<T>());
        self
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn text(&self) -> Option<&TextCodec> {
        self.text.as_ref()
    }

    #[inline]
    pub fn new_default(&self) -> Box<dyn Reflect> {
        (self.default)()
    }
}

// -----------------------------------------------------------------------------
// TextCodec

/// The text capability of a type, built from its [`FromStr`] and
/// [`Display`] implementations.
#[derive(Debug, Clone, Copy)]
pub struct TextCodec {
    decode: fn(&mut dyn Reflect, &str) -> Result<(), String>,
    encode: fn(&dyn Reflect) -> Option<String>,
}

impl TextCodec {
    pub fn of<T>() -> Self
    where
        T: Reflect + FromStr + Display,
        T::Err: Display,
    {
        Self {
            decode: decode_text::<T>,
            encode: encode_text::<T>,
        }
    }

    /// Parses `text` into `value`, returning the parser's message on failure.
    #[inline]
    pub fn decode(&self, value: &mut dyn Reflect, text: &str) -> Result<(), String> {
        (self.decode)(value, text)
    }

    /// Formats `value`, or returns `None` if it is not of the codec's type.
    #[inline]
    pub fn encode(&self, value: &dyn Reflect) -> Option<String> {
        (self.encode)(value)
    }
}

fn decode_text<T>(value: &mut dyn Reflect, text: &str) -> Result<(), String>
where
    T: Reflect + FromStr,
    T::Err: Display,
{
    let slot = value
        .downcast_mut::<T>()
        .ok_or_else(|| String::from("mismatched text target"))?;
    *slot = text.parse::<T>().map_err(|err| err.to_string())?;
    Ok(())
}

fn encode_text<T: Reflect + Display>(value: &dyn Reflect) -> Option<String> {
    value.downcast_ref::<T>().map(ToString::to_string)
}
