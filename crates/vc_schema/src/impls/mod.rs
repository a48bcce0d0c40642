//! Built-in implementations and helpers for implementing [`Typed`].
//!
//! - [`NonGenericTypeInfoCell`]: used to implement [`Typed`] for non-generic types.
//! - [`GenericTypeInfoCell`]: used to implement [`Typed`] for generic types.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `i8`-`i64`, `isize`, `u8`-`u64`, `usize`, `f32`, `f64`, `String`
//! - `Option<T>`: a nullable indirection
//! - `Vec<T>`: a list
//! - `Box<T>`: transparent, behaves as `T`
//! - opaque without text codec: `core::time::Duration`
//! - opaque with text codec: `char`
//! - [`Attachment`](crate::Attachment): opaque, filled from the side table
//!
//! [`Typed`]: crate::info::Typed

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod cell;
mod opaque;
mod option;
mod scalar;
mod vec;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
