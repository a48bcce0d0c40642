//! Per-type field resolution trees and their process-wide cache.
//!
//! A [`FieldTree`] is built once per (tag key, record type) from the
//! record's [`StructInfo`](crate::info::StructInfo). It flattens embedded
//! records into the parent's alias namespace using depth-based promotion:
//! the shallowest field wins, and equal-depth collisions are ambiguous.
//!
//! [`TypeCache`] stores the trees. They are immutable once built and shared
//! across threads through `Arc`.

// -----------------------------------------------------------------------------
// Modules

mod field_tree;
mod type_cache;

// -----------------------------------------------------------------------------
// Exports

pub use field_tree::{FieldSpec, FieldTree, Lookup};
pub use type_cache::TypeCache;
