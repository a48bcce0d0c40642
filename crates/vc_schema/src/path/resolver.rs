use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::cache::{Lookup, TypeCache};
use crate::error::SchemaError;
use crate::info::TypeInfo;
use crate::ops::{ReflectMut, Struct};
use crate::path::{PathSegment, SEPARATOR, parse_path};

/// A resolved location inside a value.
pub struct Location<'v> {
    /// The addressed field or list item, with `Box` looked through but
    /// optionals not dereferenced.
    pub value: &'v mut dyn Reflect,
    /// The path with every alias replaced by its canonical form, e.g.
    /// `Inner.x` for a promoted `x`.
    pub canonical: String,
}

/// A path checked against a record type, not yet applied to a value.
#[derive(Debug, Clone)]
pub struct CheckedPath<'k> {
    key: &'k str,
    segments: Vec<PathSegment<'k>>,
    target: &'static TypeInfo,
}

impl<'k> CheckedPath<'k> {
    #[inline]
    pub fn key(&self) -> &'k str {
        self.key
    }

    /// The type of the addressed field or list item, `Box` looked through.
    #[inline]
    pub fn target(&self) -> &'static TypeInfo {
        self.target
    }
}

/// Walks paths against live values.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    cache: &'a TypeCache,
    tag: &'a str,
    max_index: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(cache: &'a TypeCache, tag: &'a str, max_index: usize) -> Self {
        Self {
            cache,
            tag,
            max_index,
        }
    }

    /// Checks `key` against the type of `root` without touching any value.
    ///
    /// Fails with `UnknownKey` when a segment names nothing, `AmbiguousKey`
    /// for an alias promoted twice at the same depth, and `IndexTooLarge`
    /// for an index beyond the configured bound.
    pub fn check<'k>(
        &self,
        root: &dyn Struct,
        key: &'k str,
    ) -> Result<CheckedPath<'k>, SchemaError> {
        let unknown = || SchemaError::UnknownKey { key: key.into() };
        let segments = parse_path(key).ok_or_else(unknown)?;

        let mut info = root.reflect_info();
        for segment in &segments {
            info = match info.pointee() {
                TypeInfo::Struct(record) => {
                    let tree = self.cache.tree(record, self.tag);
                    match tree.lookup(segment.as_str()) {
                        Lookup::Found(spec) => spec.field().type_info(),
                        Lookup::Ambiguous => {
                            return Err(SchemaError::AmbiguousKey { key: key.into() });
                        }
                        Lookup::Missing => return Err(unknown()),
                    }
                }
                TypeInfo::List(list) => {
                    let PathSegment::Index { index, .. } = *segment else {
                        return Err(unknown());
                    };
                    if index > self.max_index {
                        return Err(SchemaError::IndexTooLarge {
                            index,
                            max: self.max_index,
                        });
                    }
                    list.item_info()
                }
                _ => return Err(unknown()),
            };
        }

        Ok(CheckedPath {
            key,
            segments,
            target: info,
        })
    }

    /// Applies a checked path to `root`, allocating null optionals and
    /// growing lists as needed.
    pub fn apply<'v>(
        &self,
        root: &'v mut dyn Struct,
        path: &CheckedPath<'_>,
    ) -> Result<Location<'v>, SchemaError> {
        let mut canonical = String::with_capacity(path.key.len());
        let mut current: &'v mut dyn Reflect = root.as_reflect_mut();

        for &segment in &path.segments {
            current = self.step(current, segment, path.key, &mut canonical)?;
        }

        Ok(Location {
            value: current,
            canonical,
        })
    }

    /// Checks `key`, then applies it to `root`.
    ///
    /// A key that fails the check leaves `root` untouched.
    pub fn resolve<'v>(
        &self,
        root: &'v mut dyn Struct,
        key: &str,
    ) -> Result<Location<'v>, SchemaError> {
        let path = self.check(&*root, key)?;
        self.apply(root, &path)
    }

    fn step<'v>(
        &self,
        current: &'v mut dyn Reflect,
        segment: PathSegment<'_>,
        key: &str,
        canonical: &mut String,
    ) -> Result<&'v mut dyn Reflect, SchemaError> {
        let unknown = || SchemaError::UnknownKey { key: key.into() };

        match current.pointee_mut().reflect_mut() {
            ReflectMut::Struct(record) => {
                let info = record.reflect_info().as_struct().ok_or_else(unknown)?;
                let tree = self.cache.tree(info, self.tag);

                let spec = match tree.lookup(segment.as_str()) {
                    Lookup::Found(spec) => spec,
                    Lookup::Ambiguous => {
                        return Err(SchemaError::AmbiguousKey { key: key.into() });
                    }
                    Lookup::Missing => return Err(unknown()),
                };

                push_segment(canonical, spec.canonical());
                walk_route(record, spec.route()).ok_or_else(unknown)
            }
            ReflectMut::List(list) => {
                let PathSegment::Index { index, raw } = segment else {
                    return Err(unknown());
                };
                if index > self.max_index {
                    return Err(SchemaError::IndexTooLarge {
                        index,
                        max: self.max_index,
                    });
                }

                list.grow(index.saturating_add(1));
                push_segment(canonical, raw);
                list.get_mut(index)
                    .map(|item| item.as_reflect_mut())
                    .ok_or_else(unknown)
            }
            _ => Err(unknown()),
        }
    }
}

/// Follows field indices through embedded records, allocating null
/// optionals between hops.
fn walk_route<'v>(mut record: &'v mut dyn Struct, route: &[usize]) -> Option<&'v mut dyn Reflect> {
    let (&last, hops) = route.split_last()?;

    for &hop in hops {
        record = match record.field_at_mut(hop)?.pointee_mut().reflect_mut() {
            ReflectMut::Struct(inner) => inner,
            _ => return None,
        };
    }

    record.field_at_mut(last).map(|field| field.as_reflect_mut())
}

fn push_segment(canonical: &mut String, segment: &str) {
    if !canonical.is_empty() {
        canonical.push(SEPARATOR);
    }
    canonical.push_str(segment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schema;
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Leaf {
        b: i32,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Base {
        #[schema("X")]
        x: String,
    }

    #[derive(Debug, Default, PartialEq, Schema)]
    struct Root {
        a: Vec<Leaf>,
        ptr: Option<Box<Leaf>>,
        #[schema(embed)]
        base: Option<Base>,
        name: String,
    }

    fn resolver(max_index: usize) -> Resolver<'static> {
        Resolver::new(TypeCache::global(), "schema", max_index)
    }

    #[test]
    fn grows_lists() {
        let mut root = Root::default();
        let loc = resolver(10).resolve(&mut root, "a.2.b").unwrap();
        assert_eq!(loc.canonical, "a.2.b");
        *loc.value.downcast_mut::<i32>().unwrap() = 7;
        assert_eq!(root.a, vec![Leaf::default(), Leaf::default(), Leaf { b: 7 }]);
    }

    #[test]
    fn index_bound() {
        let mut root = Root::default();
        let err = resolver(1).resolve(&mut root, "a.2.b").err().unwrap();
        assert_eq!(err, SchemaError::IndexTooLarge { index: 2, max: 1 });
        assert!(root.a.is_empty());

        assert!(resolver(1).resolve(&mut root, "a.1.b").is_ok());
        assert_eq!(root.a.len(), 2);
    }

    #[test]
    fn allocates_optionals() {
        let mut root = Root::default();
        let loc = resolver(10).resolve(&mut root, "ptr.b").unwrap();
        assert!(loc.value.is::<i32>());
        assert_eq!(root.ptr, Some(Box::new(Leaf::default())));
    }

    #[test]
    fn promoted_through_optional_embedding() {
        let mut root = Root::default();
        let loc = resolver(10).resolve(&mut root, "X").unwrap();
        assert_eq!(loc.canonical, "Base.X");
        *loc.value.downcast_mut::<String>().unwrap() = "x".into();
        assert_eq!(root.base.map(|b| b.x).as_deref(), Some("x"));
    }

    #[test]
    fn invalid_paths() {
        let mut root = Root::default();
        for key in ["nope", "name.x", "a.b", "a..b", "ptr.0", ""] {
            assert_eq!(
                resolver(10).resolve(&mut root, key).err(),
                Some(SchemaError::UnknownKey { key: key.into() }),
                "{key}"
            );
        }
    }

    #[test]
    fn failed_paths_leave_value_untouched() {
        let mut root = Root::default();
        for key in ["ptr.nope", "a.3.nope", "a.3.b.c", "base.nope"] {
            assert!(resolver(10).resolve(&mut root, key).is_err(), "{key}");
        }
        let err = resolver(10).resolve(&mut root, "a.1000.b").err().unwrap();
        assert_eq!(err, SchemaError::IndexTooLarge { index: 1000, max: 10 });
        assert_eq!(root, Root::default());
    }

    #[test]
    fn check_reports_target() {
        let root = Root::default();
        let path = resolver(10).check(&root, "a.4").unwrap();
        assert!(path.target().is::<Leaf>());
        assert_eq!(path.key(), "a.4");

        let path = resolver(10).check(&root, "ptr").unwrap();
        assert!(path.target().is::<Option<Box<Leaf>>>());
        assert!(path.target().pointee().is::<Leaf>());
    }
}
