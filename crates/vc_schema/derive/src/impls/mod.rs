// -----------------------------------------------------------------------------
// Modules

mod newtype_kind;
mod opaque_kind;
mod struct_kind;

mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::{SchemaDerive, SchemaMeta};

use newtype_kind::impl_newtype;
use opaque_kind::impl_opaque;
use struct_kind::impl_struct;
use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;

/// Generate every implementation for the derived type.
pub(crate) fn impl_schema(derive: &SchemaDerive) -> TokenStream {
    match derive {
        SchemaDerive::Struct { meta, fields } => impl_struct(meta, fields),
        SchemaDerive::Newtype { meta, inner } => impl_newtype(meta, inner),
        SchemaDerive::Opaque { meta } => impl_opaque(meta),
    }
}

/// The where clause additions of one kind, see [`SchemaMeta::split_generics`].
pub(crate) struct KindBounds<'a> {
    pub active_types: Vec<&'a Type>,
    pub bounds: TokenStream,
    pub self_bounds: TokenStream,
}

/// Wraps `body` into `impl ... #trait_ for #ident ... { #body }`.
pub(crate) fn impl_block(
    meta: &SchemaMeta,
    bounds: &KindBounds,
    trait_: TokenStream,
    body: TokenStream,
) -> TokenStream {
    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(
        &bounds.active_types,
        bounds.bounds.clone(),
        bounds.self_bounds.clone(),
    );

    quote! {
        impl #impl_generics #trait_ for #ident #ty_generics #where_clause {
            #body
        }
    }
}
