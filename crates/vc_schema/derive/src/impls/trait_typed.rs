use proc_macro2::TokenStream;
use quote::quote;

use super::{KindBounds, impl_block};
use crate::derive_data::SchemaMeta;

/// Generate implementation code for `Typed`.
///
/// `type_info_tokens` builds the `TypeInfo` of the type, it runs once per
/// instantiation.
pub(super) fn impl_trait_typed(
    meta: &SchemaMeta,
    bounds: &KindBounds,
    type_info_tokens: TokenStream,
) -> TokenStream {
    if !meta.attrs().impl_typed {
        return TokenStream::new();
    }

    let vc_schema_path = meta.vc_schema_path();
    let typed_ = crate::path::typed_(vc_schema_path);
    let type_info_ = crate::path::type_info_(vc_schema_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(vc_schema_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(vc_schema_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    impl_block(
        meta,
        bounds,
        typed_,
        quote! {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        },
    )
}
