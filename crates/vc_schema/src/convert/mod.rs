//! String conversion of leaf values.
//!
//! Decoding tries, in order:
//!
//! 1. a converter registered for the exact target type ([`Converters`]),
//! 2. the text codec of an opaque leaf ([`TextCodec`]),
//! 3. the built-in table keyed by [`ScalarKind`] ([`parse_primitive`]).
//!
//! Encoding mirrors it with [`Encoders`], the text codec and
//! [`Primitive`]'s `Display`.
//!
//! [`TextCodec`]: crate::info::TextCodec
//! [`ScalarKind`]: crate::ops::ScalarKind
//! [`Primitive`]: crate::ops::Primitive

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::{parse_bool, parse_primitive};
pub use registry::{Converters, Encoders};
