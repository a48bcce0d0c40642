//! Dotted path parsing and resolution.
//!
//! A key such as `items.2.name` is split on `.` into [`PathSegment`]s,
//! checked against the record type, then walked against a live value:
//! aliases select fields through the record's
//! [`FieldTree`](crate::cache::FieldTree), indices grow lists, and null
//! optionals are allocated on the way. Nothing is allocated for a key that
//! fails the check.

// -----------------------------------------------------------------------------
// Modules

mod resolver;
mod segment;

// -----------------------------------------------------------------------------
// Exports

pub use resolver::{CheckedPath, Location, Resolver};
pub use segment::{PathSegment, SEPARATOR, parse_path};
