//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod schema_derive;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, LeafKind, TypeAttributes};
pub(crate) use schema_derive::{SchemaDerive, SchemaMeta, StructField};
