use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::cache::FieldTree;
use crate::hash::{HashMap, TypeIdMap, new_map};
use crate::info::StructInfo;

/// A thread-safe store of [`FieldTree`]s keyed by tag key and record type.
///
/// Trees are built on first use and never evicted.
///
/// # Examples
///
/// ```
/// use vc_schema::cache::TypeCache;
/// use vc_schema::{Schema, Typed};
///
/// #[derive(Default, Schema)]
/// struct Login {
///     #[schema("user")]
///     name: String,
/// }
///
/// let cache = TypeCache::new();
/// let info = Login::type_info().as_struct().unwrap();
///
/// let a = cache.tree(info, "schema");
/// let b = cache.tree(info, "schema");
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(a.fields()[0].alias(), "user");
///
/// // Another tag key gets its own tree.
/// assert_eq!(cache.tree(info, "json").fields()[0].alias(), "name");
/// assert_eq!(cache.len(), 2);
/// ```
pub struct TypeCache {
    trees: RwLock<HashMap<Box<str>, TypeIdMap<Arc<FieldTree>>>>,
}

impl TypeCache {
    pub const fn new() -> Self {
        Self {
            trees: RwLock::new(new_map()),
        }
    }

    /// The process-wide cache used by decoders and encoders by default.
    pub fn global() -> &'static TypeCache {
        static GLOBAL: TypeCache = TypeCache::new();
        &GLOBAL
    }

    /// Returns the tree of `info` under `tag`, building it on first use.
    ///
    /// Concurrent first requests may build the tree more than once; the
    /// first one stored wins.
    pub fn tree(&self, info: &'static StructInfo, tag: &str) -> Arc<FieldTree> {
        let type_id = info.ty().id();

        let found = self
            .trees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tag)
            .and_then(|trees| trees.get(&type_id))
            .cloned();
        if let Some(tree) = found {
            return tree;
        }

        let tree = Arc::new(FieldTree::build(info, tag));
        log::trace!(
            "built field tree of `{}` under tag `{tag}` ({} fields)",
            info.ty().name(),
            tree.leaves().len(),
        );

        self.trees
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry_ref(tag)
            .or_insert_with(new_map)
            .entry(type_id)
            .or_insert(tree)
            .clone()
    }

    /// Number of cached trees across every tag key.
    pub fn len(&self) -> usize {
        self.trees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|trees| trees.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCache").field("len", &self.len()).finish()
    }
}
