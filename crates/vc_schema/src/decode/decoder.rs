use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::panic::AssertUnwindSafe;

use crate::attachment::{self, Attachment, Attachments};
use crate::cache::TypeCache;
use crate::convert::Converters;
use crate::decode::DecoderOptions;
use crate::decode::touched::Touched;
use crate::encode::NULL;
use crate::error::{MultiError, SchemaError};
use crate::info::TypeInfo;
use crate::ops::{ReflectKind, Struct};
use crate::path::Resolver;
use crate::Reflect;

/// Decodes flat multi-value maps into records.
///
/// A decoder is configured once and can then be shared across threads.
///
/// # Examples
///
/// ```
/// use vc_schema::{Decoder, Schema};
///
/// #[derive(Debug, Default, PartialEq, Schema)]
/// struct Search {
///     #[schema("q,required")]
///     query: String,
///     #[schema("page,default:1")]
///     page: u32,
///     tags: Vec<String>,
/// }
///
/// let decoder = Decoder::new();
/// let mut search = Search::default();
/// decoder
///     .decode(&mut search, [("q", vec!["rust"]), ("tags", vec!["a", "b"])])
///     .unwrap();
///
/// assert_eq!(search.query, "rust");
/// assert_eq!(search.page, 1);
/// assert_eq!(search.tags, ["a", "b"]);
///
/// let err = decoder.decode(&mut Search::default(), [("page", ["x"])]).unwrap_err();
/// assert_eq!(err.len(), 2);
/// assert_eq!(err.get("q").unwrap().to_string(), "q is empty");
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    pub(super) options: DecoderOptions,
    pub(super) converters: Converters,
    pub(super) cache: &'static TypeCache,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_options(DecoderOptions::default())
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            options,
            converters: Converters::new(),
            cache: TypeCache::global(),
        }
    }

    #[inline]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Reads field aliases from the tag key `tag`, e.g. `"json"`.
    pub fn set_alias_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.options.tag = tag.into();
        self
    }

    /// Sets the largest list index a path may use.
    pub fn max_index(&mut self, max_index: usize) -> &mut Self {
        self.options.max_index = max_index;
        self
    }

    pub fn ignore_unknown_keys(&mut self, ignore: bool) -> &mut Self {
        self.options.ignore_unknown_keys = ignore;
        self
    }

    pub fn zero_empty(&mut self, zero: bool) -> &mut Self {
        self.options.zero_empty = zero;
        self
    }

    /// Registers a converter for values of type `T`.
    ///
    /// It takes precedence over every built-in conversion of `T`. Returning
    /// `None` rejects the input.
    pub fn register_converter<T, F>(&mut self, f: F) -> &mut Self
    where
        T: Reflect,
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        self.converters.register::<T, F>(f);
        self
    }

    /// Uses `cache` instead of the process-wide [`TypeCache`].
    pub fn use_cache(&mut self, cache: &'static TypeCache) -> &mut Self {
        self.cache = cache;
        self
    }

    /// Decodes `src` into `dst`.
    ///
    /// `src` yields `(path, values)` pairs, such as the entries of a
    /// `HashMap<String, Vec<String>>`. Every failure is reported, keyed by
    /// its input path, or by the canonical field path for default and
    /// required failures.
    pub fn decode<T, I, K, V, S>(&self, dst: &mut T, src: I) -> Result<(), MultiError>
    where
        T: Struct,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.decode_dyn(dst, src)
    }

    /// Like [`decode`](Self::decode), also filling attachment fields from
    /// `attachments`.
    pub fn decode_with_attachments<T, I, K, V, S>(
        &self,
        dst: &mut T,
        src: I,
        attachments: &Attachments,
    ) -> Result<(), MultiError>
    where
        T: Struct,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.run(dst, src, Some(attachments))
    }

    /// Decodes into a type-erased record.
    pub fn decode_dyn<I, K, V, S>(&self, dst: &mut dyn Struct, src: I) -> Result<(), MultiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.run(dst, src, None)
    }

    fn run<I, K, V, S>(
        &self,
        dst: &mut dyn Struct,
        src: I,
        attachments: Option<&Attachments>,
    ) -> Result<(), MultiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut errors = MultiError::new();
        let mut touched = Touched::default();

        for (key, values) in src {
            let key = key.as_ref();
            let values: Vec<&str> = values.as_ref().iter().map(AsRef::as_ref).collect();
            let result = guarded(|| self.decode_key(&mut *dst, key, &values, &mut touched));
            self.record(key, result, &mut errors);
        }

        for (key, handles) in attachments.into_iter().flatten() {
            let result = guarded(|| self.attach(&mut *dst, key, handles, &mut touched));
            self.record(key, result, &mut errors);
        }

        self.apply_defaults(&mut *dst, "", &touched, &mut errors);
        self.check_required(&*dst, "", &touched, &mut errors);

        errors.into_result()
    }

    #[inline]
    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.cache, &self.options.tag, self.options.max_index)
    }

    fn decode_key(
        &self,
        dst: &mut dyn Struct,
        key: &str,
        values: &[&str],
        touched: &mut Touched,
    ) -> Result<(), SchemaError> {
        let resolver = self.resolver();
        let path = resolver.check(&*dst, key)?;
        if !self.addressable(path.target(), values) {
            return Err(SchemaError::UnknownKey { key: key.into() });
        }
        let location = resolver.apply(dst, &path)?;

        let filled = match location.value.reflect_kind() {
            ReflectKind::Scalar | ReflectKind::Opaque => values.iter().any(|v| !v.is_empty()),
            _ => !values.is_empty(),
        };
        touched.mark(location.canonical, filled);

        self.decode_leaf(location.value, key, values)
    }

    fn attach(
        &self,
        dst: &mut dyn Struct,
        key: &str,
        handles: &[Attachment],
        touched: &mut Touched,
    ) -> Result<(), SchemaError> {
        let resolver = self.resolver();
        let path = resolver.check(&*dst, key)?;
        if !attachment::is_attachment_type(path.target()) {
            return Err(SchemaError::NotAnAttachment { key: key.into() });
        }
        let location = resolver.apply(dst, &path)?;

        if !attachment::assign(location.value, handles) {
            return Err(SchemaError::NotAnAttachment { key: key.into() });
        }
        touched.mark(location.canonical, !handles.is_empty());
        Ok(())
    }

    /// Whether values can be converted into a field of type `target`.
    ///
    /// Records, and optionals of records, take only a registered converter
    /// or the null sentinel.
    fn addressable(&self, target: &'static TypeInfo, values: &[&str]) -> bool {
        let pointee = target.pointee();
        pointee.as_struct().is_none()
            || self.converters.contains(target.type_id())
            || self.converters.contains(pointee.type_id())
            || (target.as_optional().is_some() && values.last() == Some(&NULL))
    }

    fn record(&self, key: &str, result: Result<(), SchemaError>, errors: &mut MultiError) {
        match result {
            Ok(()) => {}
            Err(SchemaError::UnknownKey { .. } | SchemaError::AmbiguousKey { .. })
                if self.options.ignore_unknown_keys =>
            {
                log::debug!("skipping unknown key `{key}`");
            }
            Err(err) => errors.insert(key, err),
        }
    }
}

/// Runs `f`, turning a panic into an error for the current key.
fn guarded(f: impl FnOnce() -> Result<(), SchemaError>) -> Result<(), SchemaError> {
    std::panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let cause = panic_cause(payload.as_ref());
        log::warn!("recovered from a panic while decoding: {cause}");
        Err(SchemaError::Panicked { cause })
    })
}

fn panic_cause(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        String::from(*s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("unknown panic")
    }
}

#[cfg(test)]
mod tests {
    use crate::{Attachment, Attachments, Decoder, MultiError, Reflect, Schema, SchemaError};
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::time::Duration;

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Inner {
        #[schema("b")]
        b: i32,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Form {
        #[schema("ID")]
        id: String,
        #[schema("n")]
        n: i64,
        #[schema("a")]
        a: Vec<Inner>,
        #[schema("p")]
        p: Option<Inner>,
    }

    fn decode(decoder: &Decoder, src: &[(&str, &[&str])]) -> (Form, Result<(), MultiError>) {
        let mut form = Form::default();
        let result = decoder.decode(&mut form, src.iter().copied());
        (form, result)
    }

    #[test]
    fn last_value_wins() {
        let (form, result) = decode(&Decoder::new(), &[("ID", &["0", "1"])]);
        result.unwrap();
        assert_eq!(form.id, "1");
    }

    #[test]
    fn one_bad_key_does_not_stop_others() {
        let (form, result) = decode(
            &Decoder::new(),
            &[("ID", &["x"]), ("bogus", &["1"]), ("n", &["5"]), ("p.b", &["3"])],
        );
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.to_string(), "schema: invalid path \"bogus\"");
        assert_eq!(form.id, "x");
        assert_eq!(form.n, 5);
        assert_eq!(form.p, Some(Inner { b: 3 }));
    }

    #[test]
    fn ignore_unknown_keys() {
        let mut decoder = Decoder::new();
        decoder.ignore_unknown_keys(true);
        let (form, result) = decode(&decoder, &[("bogus", &["1"]), ("n", &["2"])]);
        result.unwrap();
        assert_eq!(form.n, 2);
    }

    #[test]
    fn index_bound_is_always_reported() {
        let mut decoder = Decoder::new();
        decoder.max_index(1).ignore_unknown_keys(true);
        let (form, result) = decode(&decoder, &[("a.2.b", &["v"]), ("a.1.b", &["4"])]);
        let errors = result.unwrap_err();
        assert_eq!(
            errors.get("a.2.b"),
            Some(&SchemaError::IndexTooLarge { index: 2, max: 1 })
        );
        assert_eq!(form.a, vec![Inner::default(), Inner { b: 4 }]);
    }

    #[test]
    fn conversion_errors_are_keyed() {
        let (_, result) = decode(&Decoder::new(), &[("n", &["abc"])]);
        let errors = result.unwrap_err();
        assert_eq!(
            errors.get("n").unwrap().to_string(),
            "schema: error converting value for \"n\". Details: invalid digit found in string"
        );
    }

    #[test]
    fn panics_are_contained() {
        let mut decoder = Decoder::new();
        decoder.register_converter::<i64, _>(|_| panic!("converter exploded"));
        let (form, result) = decode(&decoder, &[("n", &["1"]), ("ID", &["ok"])]);
        let errors = result.unwrap_err();
        assert_eq!(
            errors.get("n"),
            Some(&SchemaError::Panicked {
                cause: "converter exploded".into()
            })
        );
        assert_eq!(form.id, "ok");
    }

    #[test]
    fn map_sources() {
        let mut src: BTreeMap<String, Vec<String>> = BTreeMap::new();
        src.insert("ID".into(), vec!["a".into()]);
        let mut form = Form::default();
        Decoder::new().decode(&mut form, &src).unwrap();
        assert_eq!(form.id, "a");

        let mut dynamic: Box<dyn crate::ops::Struct> = Box::new(Form::default());
        Decoder::new()
            .decode_dyn(&mut *dynamic, [("n", ["9"])])
            .unwrap();
        assert_eq!(dynamic.as_reflect().downcast_ref::<Form>().unwrap().n, 9);
    }

    #[derive(Debug, Default, Schema)]
    struct Upload {
        #[schema("title,required")]
        title: String,
        #[schema("avatar,required")]
        avatar: Option<Attachment>,
        #[schema("docs")]
        docs: Vec<Attachment>,
        #[schema("extra")]
        extra: Option<Vec<Attachment>>,
        #[schema("timeout")]
        timeout: Duration,
    }

    #[test]
    fn attachments_bypass_conversion() {
        let mut files = Attachments::new();
        files.insert("docs".into(), vec![Attachment::new("a", "1"), Attachment::new("b", "2")]);
        files.insert("extra".into(), Vec::new());
        files.insert("title".into(), vec![Attachment::new("t", "")]);

        let mut upload = Upload::default();
        let errors = Decoder::new()
            .decode_with_attachments(&mut upload, [("title", ["hi"])], &files)
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("title"),
            Some(&SchemaError::NotAnAttachment { key: "title".into() })
        );
        assert_eq!(upload.docs.len(), 2);
        assert_eq!(upload.docs[1].filename, "b");
        assert!(upload.extra.is_none());
        // Missing files never fail the required check.
        assert!(upload.avatar.is_none());
    }

    #[test]
    fn opaque_needs_converter() {
        let mut upload = Upload::default();
        let errors = Decoder::new()
            .decode(&mut upload, [("title", ["t"]), ("timeout", ["5"])])
            .unwrap_err();
        assert_eq!(
            errors.get("timeout"),
            Some(&SchemaError::ConverterNotFound { ty: "Duration" })
        );

        let mut decoder = Decoder::new();
        decoder.register_converter::<Duration, _>(|s| s.parse().ok().map(Duration::from_secs));
        decoder
            .decode(&mut upload, [("title", ["t"]), ("timeout", ["5"])])
            .unwrap();
        assert_eq!(upload.timeout, Duration::from_secs(5));
    }
    #[derive(Debug, Default, PartialEq, Schema)]
    struct I1 {
        #[schema("X")]
        x: i32,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct I2 {
        #[schema(embed)]
        i1: I1,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct B1 {
        #[schema("X")]
        x: bool,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct B2 {
        #[schema(embed)]
        b1: B1,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct IB {
        #[schema(embed)]
        i1: I1,
        #[schema(embed)]
        b1: B1,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Layered {
        #[schema(embed)]
        i1: I1,
        #[schema(embed)]
        i2: I2,
        #[schema(embed)]
        b1: B1,
        #[schema(embed)]
        b2: B2,
        #[schema(embed)]
        ib: IB,
    }

    #[test]
    fn ambiguous_promoted_fields() {
        let src = [("X", ["123"]), ("IB.X", ["123"])];

        let mut dst = Layered::default();
        let errors = Decoder::new().decode(&mut dst, src).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("X"),
            Some(&SchemaError::AmbiguousKey { key: "X".into() })
        );
        assert_eq!(
            errors.get("IB.X"),
            Some(&SchemaError::AmbiguousKey { key: "IB.X".into() })
        );
        assert_eq!(dst, Layered::default());

        let mut decoder = Decoder::new();
        decoder.ignore_unknown_keys(true);
        decoder.decode(&mut dst, src).unwrap();
        assert_eq!(dst, Layered::default());
    }

    #[test]
    fn shallowest_promoted_field_wins() {
        let expected = Layered {
            i1: I1 { x: 123 },
            i2: I2 { i1: I1 { x: 234 } },
            b1: B1 { x: true },
            b2: B2 { b1: B1 { x: true } },
            ib: IB {
                i1: I1 { x: 345 },
                b1: B1 { x: true },
            },
        };

        let patterns: [&[(&str, &[&str])]; 2] = [
            &[
                ("I1.X", &["123"]),
                ("I2.X", &["234"]),
                ("B1.X", &["true"]),
                ("B2.X", &["1"]),
                ("IB.I1.X", &["345"]),
                ("IB.B1.X", &["on"]),
            ],
            &[
                ("I1.X", &["123"]),
                ("I2.I1.X", &["234"]),
                ("B1.X", &["true"]),
                ("B2.B1.X", &["1"]),
                ("IB.I1.X", &["345"]),
                ("IB.B1.X", &["on"]),
            ],
        ];

        for src in patterns {
            let mut dst = Layered::default();
            Decoder::new().decode(&mut dst, src.iter().copied()).unwrap();
            assert_eq!(dst, expected);
        }
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Sparse {
        #[schema("ptr")]
        ptr: Option<Box<Inner>>,
        #[schema("a")]
        a: Vec<Inner>,
        #[schema("ship")]
        ship: Option<Inner>,
    }

    #[test]
    fn rejected_paths_allocate_nothing() {
        let src: [(&str, &[&str]); 4] = [
            ("ptr.nope", &["1"]),
            ("a.3.nope", &["1"]),
            ("a.5.b.c", &["1"]),
            ("ptr", &["1"]),
        ];

        let mut dst = Sparse::default();
        let errors = Decoder::new().decode(&mut dst, src).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|(_, err)| matches!(err, SchemaError::UnknownKey { .. })));
        assert_eq!(dst, Sparse::default());

        let mut decoder = Decoder::new();
        decoder.ignore_unknown_keys(true);
        decoder.decode(&mut dst, src).unwrap();
        assert_eq!(dst, Sparse::default());

        decoder.max_index(10);
        let errors = decoder.decode(&mut dst, [("a.1000.nope", ["1"])]).unwrap_err();
        assert_eq!(
            errors.get("a.1000.nope"),
            Some(&SchemaError::IndexTooLarge { index: 1000, max: 10 })
        );
        assert!(dst.a.is_empty());
    }

    #[test]
    fn null_sentinel_clears_records() {
        let mut dst = Sparse {
            ship: Some(Inner { b: 1 }),
            ptr: Some(Box::new(Inner { b: 2 })),
            ..Sparse::default()
        };
        Decoder::new()
            .decode(&mut dst, [("ship", ["null"]), ("ptr", ["null"])])
            .unwrap();
        assert_eq!(dst, Sparse::default());
    }
}
