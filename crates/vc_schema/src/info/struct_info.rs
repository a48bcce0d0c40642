use alloc::boxed::Box;

use crate::Reflect;
use crate::info::kind_info::new_default;
use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// FieldInfo

/// A named field of a record.
///
/// Besides its name and type, a field carries the raw tag strings of every
/// tag key it was annotated with, and whether it is an embedded sub-record.
///
/// # Examples
///
/// ```
/// use vc_schema::info::FieldInfo;
///
/// const FIELD: FieldInfo = FieldInfo::new::<u32>("count")
///     .with_tags(&[("schema", "n,omitempty"), ("json", "count")]);
///
/// assert_eq!(FIELD.tag("schema"), Some("n,omitempty"));
/// assert_eq!(FIELD.tag("json"), Some("count"));
/// assert_eq!(FIELD.tag("xml"), None);
/// assert_eq!(FIELD.type_info().ty().name(), "u32");
/// ```
#[derive(Debug, Clone)]
pub struct FieldInfo {
    name: &'static str,
    tags: &'static [(&'static str, &'static str)],
    embedded: bool,
    type_info: fn() -> &'static TypeInfo,
}

impl FieldInfo {
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            tags: &[],
            embedded: false,
            type_info: T::type_info,
        }
    }

    /// Sets the `(tag key, tag string)` pairs of this field.
    #[inline]
    pub const fn with_tags(self, tags: &'static [(&'static str, &'static str)]) -> Self {
        Self { tags, ..self }
    }

    /// Marks this field as an embedded sub-record whose fields are promoted
    /// into the parent's namespace.
    #[inline]
    pub const fn with_embedded(self) -> Self {
        Self {
            embedded: true,
            ..self
        }
    }

    /// The declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The raw tag string for `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find_map(|&(k, v)| if k == key { Some(v) } else { None })
    }

    #[inline]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Type information of a record with named fields.
#[derive(Debug, Clone)]
pub struct StructInfo {
    ty: Type,
    default: fn() -> Box<dyn Reflect>,
    fields: Box<[FieldInfo]>,
}

impl StructInfo {
    pub fn new<T: Reflect + Default>(fields: &[FieldInfo]) -> Self {
        Self {
            ty: Type::of::<T>(),
            default: new_default::<T>,
            fields: fields.into(),
        }
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn new_default(&self) -> Box<dyn Reflect> {
        (self.default)()
    }
}
