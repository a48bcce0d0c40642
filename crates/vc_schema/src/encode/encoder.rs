use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::cache::TypeCache;
use crate::convert::Encoders;
use crate::encode::EncoderOptions;
use crate::error::{MultiError, SchemaError};
use crate::ops::{List, ReflectRef, Struct};
use crate::path::SEPARATOR;
use crate::{Reflect, Values};

/// The value written for a null optional.
pub const NULL: &str = "null";

/// Encodes records into flat multi-value maps.
///
/// Nested records are written under dotted paths and lists of records under
/// indexed ones, so the output decodes back into an equal record.
///
/// # Examples
///
/// ```
/// use vc_schema::{Encoder, Schema, Values};
///
/// #[derive(Default, Schema)]
/// struct Point {
///     x: i32,
///     #[schema("y,omitempty")]
///     y: i32,
///     label: Option<String>,
/// }
///
/// let mut out = Values::new();
/// Encoder::new().encode(&Point { x: 3, y: 0, label: None }, &mut out).unwrap();
///
/// assert_eq!(out["x"], ["3"]);
/// assert!(!out.contains_key("y"));
/// assert_eq!(out["label"], ["null"]);
/// ```
#[derive(Debug, Clone)]
pub struct Encoder {
    options: EncoderOptions,
    encoders: Encoders,
    cache: &'static TypeCache,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::default())
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            options,
            encoders: Encoders::new(),
            cache: TypeCache::global(),
        }
    }

    #[inline]
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Reads field aliases from the tag key `tag`, e.g. `"json"`.
    pub fn set_alias_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.options.tag = tag.into();
        self
    }

    /// Registers an encoder for values of type `T`.
    ///
    /// It wins over every built-in path, including records and lists.
    pub fn register_encoder<T, F>(&mut self, f: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.encoders.register::<T, F>(f);
        self
    }

    /// Uses `cache` instead of the process-wide [`TypeCache`].
    pub fn use_cache(&mut self, cache: &'static TypeCache) -> &mut Self {
        self.cache = cache;
        self
    }

    /// Appends every field of `src` to `dst`.
    ///
    /// A field with no encoding path is reported under its path; the other
    /// fields are still written.
    pub fn encode<T: Struct>(&self, src: &T, dst: &mut Values) -> Result<(), MultiError> {
        self.encode_dyn(src, dst)
    }

    /// Encodes a type-erased record.
    pub fn encode_dyn(&self, src: &dyn Struct, dst: &mut Values) -> Result<(), MultiError> {
        let mut errors = MultiError::new();
        self.encode_record(src, "", dst, &mut errors);
        errors.into_result()
    }

    fn encode_record(
        &self,
        record: &dyn Struct,
        prefix: &str,
        dst: &mut Values,
        errors: &mut MultiError,
    ) {
        let Some(info) = record.reflect_info().as_struct() else {
            return;
        };
        let tree = self.cache.tree(info, &self.options.tag);

        // Routes of zero embedded records tagged `omitempty`.
        let mut omitted: Vec<&[usize]> = Vec::new();

        for leaf in tree.leaves() {
            if omitted.iter().any(|route| leaf.route().starts_with(route)) {
                continue;
            }
            // Behind a null embedded optional.
            let Some(value) = locate(record, leaf.route()) else {
                continue;
            };
            let omit = leaf.options().omit_empty() && value.is_zero();

            // Promoted fields are written on their own.
            if leaf.is_embedded() && leaf.field().type_info().record().is_some() {
                if omit {
                    omitted.push(leaf.route());
                }
                continue;
            }
            if omit {
                continue;
            }

            let name = if tree.promotes(leaf.alias(), leaf.canonical()) {
                leaf.alias()
            } else {
                leaf.canonical()
            };
            self.encode_value(value, &join(prefix, name), dst, errors);
        }
    }

    fn encode_value(
        &self,
        value: &dyn Reflect,
        path: &str,
        dst: &mut Values,
        errors: &mut MultiError,
    ) {
        let value = value.as_reflect();

        if let Some(text) = self.encoders.apply(value) {
            push(dst, path, text);
            return;
        }

        match value.reflect_ref() {
            ReflectRef::Optional(optional) => match optional.value() {
                Some(inner) => self.encode_value(inner, path, dst, errors),
                None => push(dst, path, NULL.into()),
            },
            ReflectRef::Struct(record) => self.encode_record(record, path, dst, errors),
            ReflectRef::List(list) => self.encode_list(list, path, dst, errors),
            _ => match self.leaf_text(value) {
                Ok(text) => push(dst, path, text),
                Err(err) => errors.insert(path, err),
            },
        }
    }

    fn encode_list(
        &self,
        list: &dyn List,
        path: &str,
        dst: &mut Values,
        errors: &mut MultiError,
    ) {
        let holds_records = list
            .reflect_info()
            .as_list()
            .is_some_and(|info| info.item_info().record().is_some());

        if holds_records {
            for index in 0..list.len() {
                if let Some(item) = list.get(index) {
                    self.encode_value(item, &format!("{path}{SEPARATOR}{index}"), dst, errors);
                }
            }
            return;
        }

        let texts: Result<Vec<String>, SchemaError> = (0..list.len())
            .filter_map(|index| list.get(index))
            .map(|item| self.leaf_text(item))
            .collect();
        match texts {
            Ok(texts) => dst.entry(path.into()).or_default().extend(texts),
            Err(err) => errors.insert(path, err),
        }
    }

    /// The text of a leaf value: a registered encoder, then the built-in
    /// formatting of scalars, then the text codec of opaque values.
    fn leaf_text(&self, value: &dyn Reflect) -> Result<String, SchemaError> {
        let value = value.as_reflect();
        if let Some(text) = self.encoders.apply(value) {
            return Ok(text);
        }

        let info = value.reflect_info();
        let not_found = || SchemaError::EncoderNotFound {
            ty: info.type_name(),
        };

        match value.reflect_ref() {
            ReflectRef::Optional(optional) => match optional.value() {
                Some(inner) => self.leaf_text(inner),
                None => Ok(NULL.into()),
            },
            ReflectRef::Scalar(scalar) => Ok(scalar.primitive().to_string()),
            ReflectRef::Opaque(opaque) => info
                .as_opaque()
                .and_then(|opaque_info| opaque_info.text())
                .and_then(|codec| codec.encode(opaque))
                .ok_or_else(not_found),
            ReflectRef::Struct(_) | ReflectRef::List(_) => Err(not_found()),
        }
    }
}

/// Follows `route` through embedded records, or returns `None` at a null
/// optional.
fn locate<'a>(mut record: &'a dyn Struct, route: &[usize]) -> Option<&'a dyn Reflect> {
    let (&last, hops) = route.split_last()?;

    for &hop in hops {
        record = match record.field_at(hop)?.pointee()?.reflect_ref() {
            ReflectRef::Struct(inner) => inner,
            _ => return None,
        };
    }

    record.field_at(last).map(|field| field.as_reflect())
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.into()
    } else {
        format!("{prefix}{SEPARATOR}{name}")
    }
}

#[inline]
fn push(dst: &mut Values, path: &str, text: String) {
    dst.entry(path.into()).or_default().push(text);
}

#[cfg(test)]
mod tests {
    use crate::{Decoder, Encoder, Schema, SchemaError, Values};
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::time::Duration;

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Omit {
        #[schema("A,omitempty")]
        a: String,
        #[schema("B,omitempty")]
        b: i32,
        #[schema("G")]
        g: String,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Inner {
        #[schema("a")]
        a: i32,
        #[schema("b")]
        b: String,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Outer {
        #[schema(",omitempty", embed)]
        inner: Inner,
        #[schema("g")]
        g: String,
    }

    #[test]
    fn omitempty_skips_zero_embedded_records() {
        let mut out = Values::new();
        let src = Outer {
            g: "x".into(),
            ..Outer::default()
        };
        Encoder::new().encode(&src, &mut out).unwrap();
        let keys: Vec<&String> = out.keys().collect();
        assert_eq!(keys, ["g"]);

        let mut out = Values::new();
        let src = Outer {
            inner: Inner {
                a: 1,
                b: String::new(),
            },
            g: "x".into(),
        };
        Encoder::new().encode(&src, &mut out).unwrap();
        assert_eq!(out["a"], ["1"]);
        assert_eq!(out["b"], [""]);
    }

    #[test]
    fn omitempty_skips_zero_values() {
        let mut out = Values::new();
        let src = Omit {
            g: "x".into(),
            ..Omit::default()
        };
        Encoder::new().encode(&src, &mut out).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out["G"], ["x"]);
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Line {
        #[schema("sku")]
        sku: String,
        #[schema("qty")]
        qty: u32,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Base {
        #[schema("id")]
        id: u64,
        #[schema("note")]
        note: String,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Order {
        #[schema(embed)]
        base: Base,
        #[schema("note")]
        note: String,
        #[schema("lines")]
        lines: Vec<Line>,
        #[schema("ship")]
        ship: Option<Box<Line>>,
        #[schema("tags")]
        tags: Vec<String>,
        #[schema("scores")]
        scores: Vec<Option<f64>>,
        #[schema("urgent")]
        urgent: bool,
        #[schema("ratio")]
        ratio: f32,
        #[schema("initial")]
        initial: char,
    }

    fn order() -> Order {
        Order {
            base: Base {
                id: 7,
                note: "inner".into(),
            },
            note: "outer".into(),
            lines: vec![
                Line {
                    sku: "a".into(),
                    qty: 1,
                },
                Line {
                    sku: "b".into(),
                    qty: 2,
                },
            ],
            ship: Some(Box::new(Line {
                sku: "s".into(),
                qty: 0,
            })),
            tags: vec!["x".into(), "y".into()],
            scores: vec![Some(0.1), Some(2.0)],
            urgent: true,
            ratio: 0.25,
            initial: 'q',
        }
    }

    #[test]
    fn paths() {
        let mut out = Values::new();
        Encoder::new().encode(&order(), &mut out).unwrap();

        assert_eq!(out["id"], ["7"]);
        assert_eq!(out["Base.note"], ["inner"]);
        assert_eq!(out["note"], ["outer"]);
        assert_eq!(out["lines.1.sku"], ["b"]);
        assert_eq!(out["ship.sku"], ["s"]);
        assert_eq!(out["tags"], ["x", "y"]);
        assert_eq!(out["scores"], ["0.1", "2"]);
        assert_eq!(out["urgent"], ["true"]);
        assert_eq!(out["initial"], ["q"]);
        assert!(!out.contains_key("Base"));
    }

    #[test]
    fn round_trip() {
        let mut out = Values::new();
        Encoder::new().encode(&order(), &mut out).unwrap();

        let mut back = Order::default();
        Decoder::new().decode(&mut back, &out).unwrap();
        assert_eq!(back, order());
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Nullable {
        #[schema("name")]
        name: String,
        #[schema("level")]
        level: Option<i8>,
        #[schema("note")]
        note: Option<String>,
        #[schema("ship")]
        ship: Option<Line>,
        #[schema("stops")]
        stops: Vec<Option<Line>>,
        #[schema("scores")]
        scores: Vec<Option<f64>>,
    }

    #[test]
    fn round_trip_nulls() {
        let src = Nullable {
            name: "n".into(),
            stops: vec![
                None,
                Some(Line {
                    sku: "s".into(),
                    qty: 3,
                }),
            ],
            scores: vec![None, Some(1.5)],
            ..Nullable::default()
        };

        let mut out = Values::new();
        Encoder::new().encode(&src, &mut out).unwrap();
        assert_eq!(out["level"], ["null"]);
        assert_eq!(out["ship"], ["null"]);
        assert_eq!(out["stops.0"], ["null"]);
        assert_eq!(out["scores"], ["null", "1.5"]);

        let mut back = Nullable {
            level: Some(4),
            note: Some("old".into()),
            ship: Some(Line::default()),
            ..Nullable::default()
        };
        Decoder::new().decode(&mut back, &out).unwrap();
        assert_eq!(back, src);
    }

    #[derive(Debug, Default, Schema)]
    struct Timed {
        #[schema("timeout")]
        timeout: Duration,
        #[schema("name")]
        name: String,
        #[schema("level")]
        level: Option<i8>,
    }

    #[test]
    fn missing_encoder_is_per_field() {
        let mut out = Values::new();
        let errors = Encoder::new()
            .encode(&Timed::default(), &mut out)
            .unwrap_err();
        assert_eq!(
            errors.get("timeout"),
            Some(&SchemaError::EncoderNotFound { ty: "Duration" })
        );
        assert_eq!(out["name"], [""]);
        assert_eq!(out["level"], ["null"]);
    }

    #[test]
    fn registered_encoder_wins() {
        let mut encoder = Encoder::new();
        encoder
            .register_encoder::<Duration, _>(|d| format!("{}s", d.as_secs()))
            .register_encoder::<String, _>(|s| s.to_uppercase());

        let mut out = Values::new();
        let src = Timed {
            timeout: Duration::from_secs(4),
            name: "ab".into(),
            level: Some(-2),
        };
        encoder.encode(&src, &mut out).unwrap();
        assert_eq!(out["timeout"], ["4s"]);
        assert_eq!(out["name"], ["AB"]);
        assert_eq!(out["level"], ["-2"]);
    }

    #[derive(Debug, Default, Schema)]
    struct Tagged {
        #[schema("s", json = "json_s")]
        s: String,
        #[schema(json = "-")]
        hidden: String,
    }

    #[test]
    fn alternate_tag() {
        let src = Tagged {
            s: "1".into(),
            hidden: "2".into(),
        };

        let mut out = Values::new();
        Encoder::new().encode(&src, &mut out).unwrap();
        let keys: Vec<&String> = out.keys().collect();
        assert_eq!(keys, ["hidden", "s"]);

        let mut out = Values::new();
        let mut encoder = Encoder::new();
        encoder.set_alias_tag("json");
        encoder.encode(&src, &mut out).unwrap();
        let keys: Vec<&String> = out.keys().collect();
        assert_eq!(keys, ["json_s"]);
    }
}
