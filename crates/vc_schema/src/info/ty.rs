use alloc::boxed::Box;
use alloc::string::String;
use core::any::{TypeId, type_name};
use core::fmt;

/// The identity of a type: its [`TypeId`], full path and short name.
///
/// # Examples
///
/// ```
/// use vc_schema::info::Type;
///
/// let ty = Type::of::<Vec<Option<u32>>>();
/// assert_eq!(ty.name(), "Vec<Option<u32>>");
/// assert!(ty.is::<Vec<Option<u32>>>());
/// ```
#[derive(Debug, Clone)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: Box<str>,
}

impl Type {
    pub fn of<T: ?Sized + 'static>() -> Self {
        let path = type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            path,
            name: short_name(path).into_boxed_str(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The full type path, as given by [`core::any::type_name`].
    #[inline]
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// The type path without module prefixes, e.g. `Vec<String>`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Strips every `module::` prefix from a type path.
fn short_name(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    while !rest.is_empty() {
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let (ident, tail) = rest.split_at(end);

        if let Some(after) = tail.strip_prefix("::") {
            rest = after;
            continue;
        }

        out.push_str(ident);
        let mut chars = tail.chars();
        match chars.next() {
            Some(c) => {
                out.push(c);
                rest = chars.as_str();
            }
            None => rest = "",
        }
    }

    out
}
