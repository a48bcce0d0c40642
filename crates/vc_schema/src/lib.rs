#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derived code refers to `::vc_schema`, which must also resolve inside this
// crate's own tests.
extern crate self as vc_schema;

// -----------------------------------------------------------------------------
// no_std support

// The process-wide type cache and panic isolation need `std`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod hash;
mod reflection;

#[cfg(feature = "serde")]
mod serde;

pub mod attachment;
pub mod cache;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod error;
pub mod impls;
pub mod info;
pub mod ops;
pub mod path;
pub mod tag;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use attachment::{Attachment, Attachments};
pub use decode::{Decoder, DecoderOptions};
pub use encode::{Encoder, EncoderOptions};
pub use error::{ConfigError, ConversionError, MultiError, SchemaError};
pub use info::Typed;
pub use reflection::Reflect;

#[cfg(feature = "derive")]
pub use vc_schema_derive::Schema;

#[doc(hidden)]
pub mod __macro_exports {
    pub use alloc::boxed::Box;
}

use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// The flat multi-value map exchanged with the outside world.
///
/// Decoding accepts any map shaped like this one; encoding writes into it.
pub type Values = BTreeMap<String, Vec<String>>;
