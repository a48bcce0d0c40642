//! See the [`Schema`] derive macro.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SCHEMA_ATTRIBUTE_NAME: &str = "schema";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Schema Derivation
///
/// `#[derive(Schema)]` implements `Typed` and `Reflect`, plus one kind trait
/// chosen by the shape of the type:
///
/// - `struct T { ... }`: a record, implements `Struct`.
/// - `struct T(Inner);`: a newtype over a scalar, implements `Scalar` and
///   converts exactly like `Inner`.
/// - any type marked `#[schema(text)]` or `#[schema(opaque)]`: an opaque
///   leaf.
///
/// Every derived type must implement `Default`. Other shapes are rejected.
///
/// ## Field Tags
///
/// A string literal sets the tag of the default `schema` key, in the form
/// `"alias,option,option"`. Other keys use `key = "..."`, and are selected
/// with `Decoder::set_alias_tag`.
///
/// ```rust, ignore
/// #[derive(Default, Schema)]
/// struct Query {
///     #[schema("q,required")]
///     text: String,
///     #[schema("page,default:1", json = "pageNumber")]
///     page: u32,
///     #[schema("-")]
///     secret: String,
/// }
/// ```
///
/// Known options are `required`, `omitempty` and `default:<value>`. An empty
/// alias keeps the field name; the alias `-` hides the field from decoding
/// and encoding.
///
/// ## Embedding
///
/// `#[schema(embed)]` promotes the fields of a sub-record into the parent's
/// namespace. The field may be the record itself, a `Box` of it, or an
/// `Option` of either.
///
/// ```rust, ignore
/// #[derive(Default, Schema)]
/// struct Page {
///     #[schema(embed)]
///     paging: Paging,
///     title: String,
/// }
/// ```
///
/// ## Skipping
///
/// `#[schema(skip)]` leaves a field out of the type information entirely,
/// so its type needs no implementation of its own.
///
/// ## Opaque Leaves
///
/// `#[schema(text)]` converts the value through `FromStr` and `Display`.
/// `#[schema(opaque)]` needs a converter registered on the decoder and an
/// encoder registered on the encoder. Both need `PartialEq`: a value equal
/// to `Default::default()` is zero.
///
/// ```rust, ignore
/// #[derive(Debug, Default, PartialEq, Schema)]
/// #[schema(text)]
/// enum Color {
///     #[default]
///     Red,
///     Blue,
/// }
///
/// impl FromStr for Color { /* ... */ }
/// impl Display for Color { /* ... */ }
/// ```
///
/// ## Manual `Typed`
///
/// `#[schema(typed = false)]` skips the `Typed` implementation, which must
/// then be written by hand.
///
/// These type level attributes cannot be applied to fields.
#[proc_macro_derive(Schema, attributes(schema))]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::SchemaDerive::from_input(&ast) {
        Ok(derive) => impls::impl_schema(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
