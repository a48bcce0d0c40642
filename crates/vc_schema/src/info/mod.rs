//! Static type information.
//!
//! ## Menu
//!
//! - [`Type`]: a `TypeId` with its full path and short display name.
//! - [`TypeInfo`]: what the codec needs to know about one type, one of:
//!     - [`StructInfo`]: a record, with its ordered [`FieldInfo`]s.
//!     - [`ListInfo`]: a growable list, e.g. `Vec<T>`.
//!     - [`OptionalInfo`]: a nullable indirection, e.g. `Option<T>`.
//!     - [`ScalarInfo`]: a primitive, or a newtype over one.
//!     - [`OpaqueInfo`]: a leaf that is converted as a whole, optionally
//!       through a [`TextCodec`].
//! - [`Typed`]: the static accessor implemented by every supported type.

// -----------------------------------------------------------------------------
// Modules

mod kind_info;
mod struct_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use kind_info::{ListInfo, OpaqueInfo, OptionalInfo, ScalarInfo, TextCodec};
pub use struct_info::{FieldInfo, StructInfo};
pub use ty::Type;
pub use type_info::TypeInfo;
pub use typed::Typed;
