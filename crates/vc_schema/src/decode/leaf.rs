use alloc::boxed::Box;
use alloc::string::String;

use crate::Reflect;
use crate::convert::parse_primitive;
use crate::decode::Decoder;
use crate::encode::NULL;
use crate::error::{ConversionError, SchemaError};
use crate::info::{TextCodec, TypeInfo};
use crate::ops::{List, ReflectMut, ScalarKind};

/// How the items of a list are converted, chosen once per list.
#[derive(Clone, Copy)]
enum ItemPath {
    Registered,
    Text(TextCodec),
    Builtin(ScalarKind),
}

impl Decoder {
    /// Converts `values` into the resolved field `field`.
    ///
    /// The null sentinel clears an optional field. A null optional stays
    /// null if the conversion fails.
    pub(super) fn decode_leaf(
        &self,
        field: &mut dyn Reflect,
        key: &str,
        values: &[&str],
    ) -> Result<(), SchemaError> {
        let last = values.last().copied().unwrap_or("");
        let registered = self.converters.contains(field.reflect_info().type_id());

        let was_null = match field.reflect_mut() {
            ReflectMut::Optional(optional) if last == NULL && !registered => {
                optional.clear();
                return Ok(());
            }
            ReflectMut::Optional(optional) => optional.is_null(),
            _ => false,
        };

        let result = self.convert_leaf(field, key, values, last);
        if result.is_err()
            && was_null
            && let ReflectMut::Optional(optional) = field.reflect_mut()
        {
            optional.clear();
        }
        result
    }

    fn convert_leaf(
        &self,
        field: &mut dyn Reflect,
        key: &str,
        values: &[&str],
        last: &str,
    ) -> Result<(), SchemaError> {
        let failed = |ty: &'static str, cause| {
            SchemaError::Conversion(ConversionError {
                key: key.into(),
                ty,
                index: None,
                cause,
            })
        };

        if let Some(ok) = self.converters.apply(field, last) {
            let ty = field.reflect_info().type_name();
            return if ok { Ok(()) } else { Err(failed(ty, None)) };
        }

        let target = field.pointee_mut();
        let info = target.reflect_info();
        let ty = info.type_name();

        if let Some(ok) = self.converters.apply(target, last) {
            return if ok { Ok(()) } else { Err(failed(ty, None)) };
        }

        match target.reflect_mut() {
            ReflectMut::List(list) => self.decode_list(list, info, key, values),
            ReflectMut::Opaque(value) => {
                if let Some(codec) = info.as_opaque().and_then(|opaque| opaque.text()) {
                    codec.decode(value, last).map_err(|cause| failed(ty, Some(cause)))
                } else if last.is_empty() {
                    self.reset_empty(value);
                    Ok(())
                } else {
                    Err(SchemaError::ConverterNotFound { ty })
                }
            }
            ReflectMut::Scalar(scalar) => {
                if last.is_empty() {
                    self.reset_empty(scalar.as_reflect_mut());
                    return Ok(());
                }
                let primitive = parse_primitive(scalar.scalar_kind(), last)
                    .map_err(|cause| failed(ty, Some(cause)))?;
                scalar.set_primitive(primitive).map_err(|_| failed(ty, None))
            }
            ReflectMut::Struct(_) | ReflectMut::Optional(_) => {
                Err(SchemaError::UnknownKey { key: key.into() })
            }
        }
    }

    /// Replaces the list with the converted `values`, or leaves it untouched
    /// if any of them fails.
    fn decode_list(
        &self,
        list: &mut dyn List,
        info: &'static TypeInfo,
        key: &str,
        values: &[&str],
    ) -> Result<(), SchemaError> {
        let Some(list_info) = info.as_list() else {
            return Err(SchemaError::UnknownKey { key: key.into() });
        };
        let item_info = list_info.item_info();
        let elem_info = item_info.pointee();
        let ty = elem_info.type_name();

        let path = if self.converters.contains(elem_info.type_id()) {
            ItemPath::Registered
        } else if let Some(codec) = elem_info.as_opaque().and_then(|opaque| opaque.text()) {
            ItemPath::Text(*codec)
        } else if let Some(scalar) = elem_info.as_scalar() {
            ItemPath::Builtin(scalar.kind())
        } else {
            return Err(SchemaError::ConverterNotFound { ty });
        };

        let failed = |index, cause| {
            SchemaError::Conversion(ConversionError {
                key: key.into(),
                ty,
                index,
                cause,
            })
        };

        let mut fresh = info.new_default();
        let ReflectMut::List(items) = fresh.reflect_mut() else {
            return Err(SchemaError::UnknownKey { key: key.into() });
        };
        let mut push = |index, item| items.push(item).map_err(|_| failed(Some(index), None));

        for (index, &value) in values.iter().enumerate() {
            if value.is_empty() {
                if self.options.zero_empty {
                    push(index, item_info.new_default())?;
                }
                continue;
            }

            let cause = match self.convert_item(path, item_info, value) {
                Ok(item) => {
                    push(index, item)?;
                    continue;
                }
                Err(cause) => cause,
            };

            // A single comma separated value, e.g. `1,2,3`.
            if matches!(path, ItemPath::Text(_)) || !value.contains(',') {
                return Err(failed(Some(index), cause));
            }
            for piece in value.split(',') {
                if piece.is_empty() {
                    if self.options.zero_empty {
                        push(index, item_info.new_default())?;
                    }
                    continue;
                }
                let item = self
                    .convert_item(path, item_info, piece)
                    .map_err(|cause| failed(Some(index), cause))?;
                push(index, item)?;
            }
        }

        list.set(fresh).map_err(|_| failed(None, None))
    }

    fn convert_item(
        &self,
        path: ItemPath,
        item_info: &'static TypeInfo,
        text: &str,
    ) -> Result<Box<dyn Reflect>, Option<String>> {
        let mut item = item_info.new_default();
        if text == NULL && item_info.as_optional().is_some() {
            return Ok(item);
        }

        let target = item.pointee_mut();

        match path {
            ItemPath::Registered => {
                if self.converters.apply(target, text) != Some(true) {
                    return Err(None);
                }
            }
            ItemPath::Text(codec) => codec.decode(target, text).map_err(Some)?,
            ItemPath::Builtin(kind) => {
                let primitive = parse_primitive(kind, text).map_err(Some)?;
                let ReflectMut::Scalar(scalar) = target.reflect_mut() else {
                    return Err(None);
                };
                scalar.set_primitive(primitive).map_err(|_| None)?;
            }
        }

        Ok(item)
    }

    /// Handles an empty input string: resets the value when zero-empty is
    /// on, leaves it alone otherwise.
    fn reset_empty(&self, value: &mut dyn Reflect) {
        if self.options.zero_empty {
            let zero = value.reflect_info().new_default();
            if value.set(zero).is_err() {
                log::debug!("cannot reset `{}` to zero", value.reflect_info().type_name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Decoder, Schema, SchemaError};
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Level(u8);

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Lists {
        #[schema("ID")]
        ids: Vec<i32>,
        #[schema("S")]
        strings: Vec<String>,
        #[schema("O")]
        optional: Vec<Option<u8>>,
        #[schema("C")]
        chars: Vec<char>,
        #[schema("L")]
        level: Level,
        #[schema("P")]
        ptr: Option<f64>,
        #[schema("B")]
        flag: bool,
        #[schema("N")]
        name: String,
    }

    fn decode(
        decoder: &Decoder,
        lists: &mut Lists,
        key: &str,
        values: &[&str],
    ) -> Result<(), SchemaError> {
        match decoder.decode(lists, [(key, values)]) {
            Ok(()) => Ok(()),
            Err(errors) => Err(errors.into_iter().next().unwrap().1),
        }
    }

    #[test]
    fn comma_separated_values() {
        let mut lists = Lists::default();
        decode(&Decoder::new(), &mut lists, "ID", &["0,1"]).unwrap();
        assert_eq!(lists.ids, [0, 1]);

        decode(&Decoder::new(), &mut lists, "S", &["0,1"]).unwrap();
        assert_eq!(lists.strings, ["0,1"]);

        decode(&Decoder::new(), &mut lists, "ID", &["4", "5,6", "7"]).unwrap();
        assert_eq!(lists.ids, [4, 5, 6, 7]);
    }

    #[test]
    fn failed_item_keeps_list() {
        let mut lists = Lists {
            ids: vec![9],
            ..Lists::default()
        };
        let err = decode(&Decoder::new(), &mut lists, "ID", &["1", "x,2"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema: error converting value for index 1 of \"ID\". Details: invalid digit found in string"
        );
        assert_eq!(lists.ids, [9]);
    }

    #[test]
    fn empty_items() {
        let mut lists = Lists::default();
        decode(&Decoder::new(), &mut lists, "ID", &["1", "", "2"]).unwrap();
        assert_eq!(lists.ids, [1, 2]);

        let mut decoder = Decoder::new();
        decoder.zero_empty(true);
        decode(&decoder, &mut lists, "ID", &["1", "", "2"]).unwrap();
        assert_eq!(lists.ids, [1, 0, 2]);

        decode(&decoder, &mut lists, "O", &["", "3"]).unwrap();
        assert_eq!(lists.optional, [None, Some(3)]);
    }

    #[test]
    fn text_items_never_split() {
        let mut lists = Lists::default();
        decode(&Decoder::new(), &mut lists, "C", &["a", "b"]).unwrap();
        assert_eq!(lists.chars, ['a', 'b']);

        let err = decode(&Decoder::new(), &mut lists, "C", &["a,b"]).unwrap_err();
        assert!(matches!(err, SchemaError::Conversion(e) if e.index == Some(0)));
    }

    #[test]
    fn element_converter() {
        let mut decoder = Decoder::new();
        decoder.register_converter::<i32, _>(|s| match s {
            "one" => Some(1),
            "two" => Some(2),
            _ => None,
        });
        let mut lists = Lists::default();
        decode(&decoder, &mut lists, "ID", &["one", "two,one"]).unwrap();
        assert_eq!(lists.ids, [1, 2, 1]);
    }

    #[test]
    fn list_converter_wins() {
        let mut decoder = Decoder::new();
        decoder.register_converter::<Vec<i32>, _>(|s| Some(s.bytes().map(i32::from).collect()));
        let mut lists = Lists::default();
        decode(&decoder, &mut lists, "ID", &["ab"]).unwrap();
        assert_eq!(lists.ids, [97, 98]);
    }

    #[test]
    fn scalars() {
        let mut lists = Lists::default();
        let decoder = Decoder::new();

        decode(&decoder, &mut lists, "L", &["7"]).unwrap();
        assert_eq!(lists.level, Level(7));
        assert!(decode(&decoder, &mut lists, "L", &["300"]).is_err());

        decode(&decoder, &mut lists, "P", &["2.5"]).unwrap();
        assert_eq!(lists.ptr, Some(2.5));

        decode(&decoder, &mut lists, "B", &["on"]).unwrap();
        assert!(lists.flag);
        let err = decode(&decoder, &mut lists, "B", &["yup"]).unwrap_err();
        assert!(matches!(err, SchemaError::Conversion(e) if e.ty == "bool"));
    }

    #[test]
    fn empty_strings() {
        let mut lists = Lists {
            name: "keep".into(),
            ..Lists::default()
        };
        decode(&Decoder::new(), &mut lists, "N", &[""]).unwrap();
        assert_eq!(lists.name, "keep");
        decode(&Decoder::new(), &mut lists, "N", &[]).unwrap();
        assert_eq!(lists.name, "keep");

        let mut decoder = Decoder::new();
        decoder.zero_empty(true);
        decode(&decoder, &mut lists, "N", &[""]).unwrap();
        assert_eq!(lists.name, "");
    }

    #[test]
    fn custom_boolean_spelling() {
        let mut decoder = Decoder::new();
        decoder.register_converter::<bool, _>(|s| match s {
            "yup" => Some(true),
            "nope" => Some(false),
            _ => None,
        });
        let mut lists = Lists::default();
        decode(&decoder, &mut lists, "B", &["yup"]).unwrap();
        assert!(lists.flag);
        assert!(decode(&decoder, &mut lists, "B", &["true"]).is_err());
    }

    #[test]
    fn null_sentinel_clears_optionals() {
        let mut lists = Lists {
            ptr: Some(1.5),
            ..Lists::default()
        };
        decode(&Decoder::new(), &mut lists, "P", &["null"]).unwrap();
        assert_eq!(lists.ptr, None);

        decode(&Decoder::new(), &mut lists, "O", &["4", "null", "5"]).unwrap();
        assert_eq!(lists.optional, [Some(4), None, Some(5)]);

        // Not an optional, so the sentinel is plain text.
        decode(&Decoder::new(), &mut lists, "N", &["null"]).unwrap();
        assert_eq!(lists.name, "null");
    }

    #[test]
    fn failed_conversion_keeps_null() {
        let mut lists = Lists::default();
        assert!(decode(&Decoder::new(), &mut lists, "P", &["abc"]).is_err());
        assert_eq!(lists.ptr, None);

        lists.ptr = Some(2.0);
        assert!(decode(&Decoder::new(), &mut lists, "P", &["abc"]).is_err());
        assert_eq!(lists.ptr, Some(2.0));
    }

    #[test]
    fn no_values() {
        let mut lists = Lists {
            ids: vec![1],
            ..Lists::default()
        };
        decode(&Decoder::new(), &mut lists, "ID", &[]).unwrap();
        assert!(lists.ids.is_empty());
    }
}
