use alloc::format;
use alloc::string::{String, ToString};
use core::str::FromStr;

use crate::ops::{Primitive, ScalarKind};

/// Parses a boolean, ASCII case-insensitively.
///
/// Accepts `true`, `false`, `on`, `off`, `t`, `f`, `1` and `0`. Other
/// spellings need a registered converter.
///
/// # Examples
///
/// ```
/// use vc_schema::convert::parse_bool;
///
/// assert_eq!(parse_bool("ON"), Some(true));
/// assert_eq!(parse_bool("f"), Some(false));
/// assert_eq!(parse_bool("yes"), None);
/// ```
pub fn parse_bool(text: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "on", "t", "1"];
    const FALSE: [&str; 4] = ["false", "off", "f", "0"];

    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Some(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(text)) {
        Some(false)
    } else {
        None
    }
}

#[inline]
fn parse<T: FromStr>(text: &str) -> Result<T, String>
where
    T::Err: ToString,
{
    text.parse::<T>().map_err(|err| err.to_string())
}

/// Parses `text` as a value of `kind`, returning the parser's message on
/// failure.
///
/// Integers are base-10 and must fit their width. Strings pass through
/// unchanged.
pub fn parse_primitive(kind: ScalarKind, text: &str) -> Result<Primitive, String> {
    Ok(match kind {
        ScalarKind::Bool => match parse_bool(text) {
            Some(v) => Primitive::Bool(v),
            None => return Err(format!("invalid boolean {text:?}")),
        },
        ScalarKind::I8 => Primitive::I8(parse(text)?),
        ScalarKind::I16 => Primitive::I16(parse(text)?),
        ScalarKind::I32 => Primitive::I32(parse(text)?),
        ScalarKind::I64 => Primitive::I64(parse(text)?),
        ScalarKind::Isize => Primitive::Isize(parse(text)?),
        ScalarKind::U8 => Primitive::U8(parse(text)?),
        ScalarKind::U16 => Primitive::U16(parse(text)?),
        ScalarKind::U32 => Primitive::U32(parse(text)?),
        ScalarKind::U64 => Primitive::U64(parse(text)?),
        ScalarKind::Usize => Primitive::Usize(parse(text)?),
        ScalarKind::F32 => Primitive::F32(parse(text)?),
        ScalarKind::F64 => Primitive::F64(parse(text)?),
        ScalarKind::String => Primitive::String(text.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans() {
        for t in ["true", "TRUE", "On", "t", "1"] {
            assert_eq!(parse_bool(t), Some(true), "{t}");
        }
        for f in ["false", "Off", "F", "0"] {
            assert_eq!(parse_bool(f), Some(false), "{f}");
        }
        for bad in ["", "yes", "2", " true"] {
            assert_eq!(parse_bool(bad), None, "{bad}");
        }
    }

    #[test]
    fn widths_are_checked() {
        assert_eq!(parse_primitive(ScalarKind::I8, "-128"), Ok(Primitive::I8(-128)));
        assert!(parse_primitive(ScalarKind::I8, "128").is_err());
        assert!(parse_primitive(ScalarKind::U32, "-1").is_err());
        assert!(parse_primitive(ScalarKind::U64, "1.5").is_err());
    }

    #[test]
    fn floats_and_strings() {
        assert_eq!(parse_primitive(ScalarKind::F64, "1.25"), Ok(Primitive::F64(1.25)));
        assert_eq!(parse_primitive(ScalarKind::F32, "-3"), Ok(Primitive::F32(-3.0)));
        assert!(parse_primitive(ScalarKind::F64, "abc").is_err());
        assert_eq!(
            parse_primitive(ScalarKind::String, " a,b "),
            Ok(Primitive::String(" a,b ".into()))
        );
    }

    #[test]
    fn errors_carry_cause() {
        let err = parse_primitive(ScalarKind::I32, "x").unwrap_err();
        assert_eq!(err, "invalid digit found in string");
        assert_eq!(parse_primitive(ScalarKind::Bool, "yes").unwrap_err(), "invalid boolean \"yes\"");
    }
}
