//! Kind-specific access to reflected values.
//!
//! ## Menu
//!
//! The following are subtraits of [`Reflect`], each giving access to one kind
//! of value:
//!
//! - [`Struct`]: records with named fields.
//! - [`List`]: growable lists (e.g. `Vec<T>`).
//! - [`Optional`]: nullable indirections (e.g. `Option<T>`).
//! - [`Scalar`]: primitives and newtypes over them, read and written as a
//!   [`Primitive`].
//!
//! [`ReflectRef`] and [`ReflectMut`] select the right subtrait for a value.
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod optional_ops;
mod scalar_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectKind, ReflectMut, ReflectRef};
pub use list_ops::List;
pub use optional_ops::Optional;
pub use scalar_ops::{Primitive, Scalar, ScalarKind};
pub use struct_ops::Struct;
