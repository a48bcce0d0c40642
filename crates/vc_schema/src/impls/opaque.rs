use alloc::boxed::Box;
use core::time::Duration;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, Typed};
use crate::ops::{ReflectMut, ReflectRef};

macro_rules! impl_opaque {
    ($ty:ty $(, $text:ident)?) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    let info = OpaqueInfo::new::<Self>();
                    $( let info = info.$text::<Self>(); )?
                    TypeInfo::Opaque(info)
                })
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn reflect_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Opaque(self)
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
        }
    };
}

// No text form: needs a registered converter.
impl_opaque!(Duration);

impl_opaque!(char, with_text);

// Filled from the attachments side table only.
impl_opaque!(crate::Attachment);

#[cfg(test)]
mod tests {
    use crate::Typed;
    use alloc::string::String;
    use core::time::Duration;

    #[test]
    fn duration_has_no_text() {
        let info = Duration::type_info().as_opaque().unwrap();
        assert!(info.text().is_none());
    }

    #[test]
    fn char_text_codec() {
        let codec = *char::type_info().as_opaque().unwrap().text().unwrap();
        let mut c = 'a';
        codec.decode(&mut c, "z").unwrap();
        assert_eq!(c, 'z');
        assert!(codec.decode(&mut c, "zz").is_err());
        assert_eq!(codec.encode(&c), Some(String::from("z")));
        assert_eq!(codec.encode(&1_u8), None);
    }
}

#[cfg(test)]
mod derive_tests {
    use crate::ops::{Primitive, ReflectKind, Scalar, ScalarKind};
    use crate::{Reflect, Schema, Typed};
    use alloc::string::{String, ToString};
    use core::fmt;
    use core::str::FromStr;

    #[derive(Debug, Default, PartialEq, Schema)]
    #[schema(text)]
    enum Color {
        #[default]
        Red,
        Blue,
    }

    impl FromStr for Color {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "red" => Ok(Self::Red),
                "blue" => Ok(Self::Blue),
                other => Err(alloc::format!("unknown color {other}")),
            }
        }
    }

    impl fmt::Display for Color {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Self::Red => "red",
                Self::Blue => "blue",
            })
        }
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    #[schema(opaque)]
    struct Token([u8; 4]);

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Port(u16);

    #[test]
    fn text_leaf() {
        let codec = *Color::type_info().as_opaque().unwrap().text().unwrap();
        let mut color = Color::Red;
        assert!(color.is_zero());

        codec.decode(&mut color, "blue").unwrap();
        assert_eq!(color, Color::Blue);
        assert!(!color.is_zero());
        assert_eq!(codec.decode(&mut color, "green").unwrap_err(), "unknown color green");
        assert_eq!(codec.encode(&color), Some("blue".to_string()));
    }

    #[test]
    fn opaque_leaf() {
        let info = Token::type_info().as_opaque().unwrap();
        assert!(info.text().is_none());
        assert_eq!(Token([1, 2, 3, 4]).reflect_kind(), ReflectKind::Opaque);
        assert!(Token::default().is_zero());
    }

    #[test]
    fn scalar_newtype() {
        assert_eq!(Port::type_info().as_scalar().unwrap().kind(), ScalarKind::U16);

        let mut port = Port::default();
        assert!(port.is_zero());
        port.set_primitive(Primitive::U16(8080)).unwrap();
        assert_eq!(port, Port(8080));
        assert_eq!(port.primitive(), Primitive::U16(8080));
        assert!(port.set_primitive(Primitive::I32(1)).is_err());
    }
}
