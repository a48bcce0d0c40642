use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::hash::{HashMap, new_map};
use crate::info::{FieldInfo, StructInfo};
use crate::tag::{FieldTag, TagOptions};

// -----------------------------------------------------------------------------
// FieldSpec

/// One visible field of a record, possibly reached through embedding.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    alias: &'static str,
    canonical: Box<str>,
    route: Box<[usize]>,
    depth: usize,
    options: TagOptions<'static>,
    field: &'static FieldInfo,
}

impl FieldSpec {
    /// The wire name of the field.
    #[inline]
    pub fn alias(&self) -> &'static str {
        self.alias
    }

    /// The dotted chain of aliases from the owning record, e.g. `Inner.x`.
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Field indices from the owning record down to this field.
    ///
    /// Every index but the last selects an embedded field.
    #[inline]
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// Levels of embedding traversed to reach the field, 0 for direct ones.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn options(&self) -> TagOptions<'static> {
        self.options
    }

    #[inline]
    pub fn field(&self) -> &'static FieldInfo {
        self.field
    }

    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.field.is_embedded()
    }

    /// The index of the field inside its own record.
    #[inline]
    pub fn index(&self) -> usize {
        self.route[self.route.len() - 1]
    }

    fn promoted(&self, parent: &FieldSpec, parent_index: usize) -> Self {
        let mut route = Vec::with_capacity(self.route.len() + 1);
        route.push(parent_index);
        route.extend_from_slice(&self.route);

        Self {
            alias: self.alias,
            canonical: format!("{}.{}", parent.canonical, self.canonical).into_boxed_str(),
            route: route.into_boxed_slice(),
            depth: self.depth + 1,
            options: self.options,
            field: self.field,
        }
    }
}

// -----------------------------------------------------------------------------
// Lookup

/// The result of looking up an alias in a [`FieldTree`].
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
    Found(&'a FieldSpec),
    /// Two or more fields share the alias at the same minimum depth.
    Ambiguous,
    Missing,
}

#[derive(Debug, Clone, Copy)]
enum Entry {
    Field(usize),
    Ambiguous { depth: usize },
}

// -----------------------------------------------------------------------------
// FieldTree

/// The resolved alias namespace of one record type under one tag key.
#[derive(Debug)]
pub struct FieldTree {
    info: &'static StructInfo,
    fields: Box<[FieldSpec]>,
    leaves: Box<[FieldSpec]>,
    entries: Box<[(&'static str, Entry)]>,
    index: HashMap<&'static str, usize>,
}

impl FieldTree {
    /// Builds the tree of `info`, reading field tags under `tag`.
    pub fn build(info: &'static StructInfo, tag: &str) -> Self {
        let mut stack = Vec::new();
        Self::build_in(info, tag, &mut stack)
    }

    fn build_in(info: &'static StructInfo, tag: &str, stack: &mut Vec<TypeId>) -> Self {
        stack.push(info.ty().id());

        let mut fields = Vec::with_capacity(info.field_len());
        let mut leaves = Vec::with_capacity(info.field_len());

        for (index, field) in info.fields().iter().enumerate() {
            let parsed = FieldTag::parse(field.tag(tag).unwrap_or(""));
            if parsed.is_excluded() {
                continue;
            }

            let alias = parsed.alias_or(default_alias(field));
            let spec = FieldSpec {
                alias,
                canonical: alias.into(),
                route: Box::new([index]),
                depth: 0,
                options: parsed.options(),
                field,
            };
            leaves.push(spec.clone());

            if field.is_embedded()
                && let Some(child) = field.type_info().record()
            {
                if stack.contains(&child.ty().id()) {
                    log::warn!(
                        "`{}` embeds itself through `{}`; its fields are not promoted again",
                        child.ty().name(),
                        info.ty().name(),
                    );
                } else {
                    let child_tree = Self::build_in(child, tag, stack);
                    leaves.extend(child_tree.leaves.iter().map(|leaf| leaf.promoted(&spec, index)));
                }
            }

            fields.push(spec);
        }

        stack.pop();

        let mut entries: Vec<(&'static str, Entry)> = Vec::new();
        let mut index: HashMap<&'static str, usize> = new_map();

        for (position, leaf) in leaves.iter().enumerate() {
            match index.get(leaf.alias) {
                None => {
                    index.insert(leaf.alias, entries.len());
                    entries.push((leaf.alias, Entry::Field(position)));
                }
                Some(&slot) => {
                    let current = match entries[slot].1 {
                        Entry::Field(other) => leaves[other].depth,
                        Entry::Ambiguous { depth } => depth,
                    };
                    if leaf.depth < current {
                        entries[slot].1 = Entry::Field(position);
                    } else if leaf.depth == current {
                        entries[slot].1 = Entry::Ambiguous { depth: current };
                    }
                }
            }
        }

        Self {
            info,
            fields: fields.into_boxed_slice(),
            leaves: leaves.into_boxed_slice(),
            entries: entries.into_boxed_slice(),
            index,
        }
    }

    #[inline]
    pub fn info(&self) -> &'static StructInfo {
        self.info
    }

    /// Direct fields in declaration order, excluded ones left out.
    #[inline]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Every field reachable through embedding, shadowed ones included, in
    /// declaration order.
    #[inline]
    pub fn leaves(&self) -> &[FieldSpec] {
        &self.leaves
    }

    /// Looks up `alias`: an exact match first, then an ASCII
    /// case-insensitive one in declaration order.
    pub fn lookup(&self, alias: &str) -> Lookup<'_> {
        let entry = match self.index.get(alias) {
            Some(&slot) => Some(self.entries[slot].1),
            None => self
                .entries
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(alias))
                .map(|&(_, entry)| entry),
        };

        match entry {
            Some(Entry::Field(position)) => Lookup::Found(&self.leaves[position]),
            Some(Entry::Ambiguous { .. }) => Lookup::Ambiguous,
            None => Lookup::Missing,
        }
    }

    /// Whether `alias` resolves exactly to the field at `canonical`.
    pub fn promotes(&self, alias: &str, canonical: &str) -> bool {
        match self.index.get(alias).map(|&slot| self.entries[slot].1) {
            Some(Entry::Field(position)) => &*self.leaves[position].canonical == canonical,
            _ => false,
        }
    }
}

/// Embedded fields default to the short name of the embedded type.
fn default_alias(field: &'static FieldInfo) -> &'static str {
    if field.is_embedded() {
        field.type_info().pointee().type_name()
    } else {
        field.name()
    }
}
