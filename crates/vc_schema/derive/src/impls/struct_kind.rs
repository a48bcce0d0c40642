use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use super::{KindBounds, impl_block, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::{SchemaMeta, StructField};

/// Implement `Typed`, `Reflect` and `Struct` for a struct with named fields.
pub(crate) fn impl_struct(meta: &SchemaMeta, fields: &[StructField]) -> TokenStream {
    let vc_schema_path = meta.vc_schema_path();
    let typed_ = crate::path::typed_(vc_schema_path);
    let reflect_ = crate::path::reflect_(vc_schema_path);

    let bounds = KindBounds {
        active_types: fields.iter().map(|field| field.ty).collect(),
        bounds: quote!(#typed_ + #reflect_),
        self_bounds: TokenStream::new(),
    };

    // trait: Typed
    let struct_info_ = crate::path::struct_info_(vc_schema_path);
    let type_info_ = crate::path::type_info_(vc_schema_path);
    let field_infos = fields
        .iter()
        .map(|field| field.to_info_tokens(vc_schema_path));
    let typed_trait_tokens = impl_trait_typed(
        meta,
        &bounds,
        quote! {
            #type_info_::Struct(#struct_info_::new::<Self>(&[
                #(#field_infos),*
            ]))
        },
    );

    // trait: Reflect
    let field_idents = fields.iter().map(|field| field.ident);
    let is_zero_tokens = quote! {
        true #(&& #reflect_::is_zero(&self.#field_idents))*
    };
    let reflect_trait_tokens = impl_trait_reflect(
        meta,
        &bounds,
        Ident::new("Struct", Span::call_site()),
        is_zero_tokens,
    );

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(meta, &bounds, fields);

    quote! {
        #typed_trait_tokens

        #reflect_trait_tokens

        #struct_trait_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
///
/// Indices follow the declaration order of the fields that are not skipped.
fn impl_trait_struct(meta: &SchemaMeta, bounds: &KindBounds, fields: &[StructField]) -> TokenStream {
    let vc_schema_path = meta.vc_schema_path();
    let struct_ = crate::path::struct_(vc_schema_path);
    let reflect_ = crate::path::reflect_(vc_schema_path);

    let field_len = fields.len();
    let indices = (0..field_len).collect::<Vec<usize>>();
    let field_idents = fields.iter().map(|field| field.ident).collect::<Vec<_>>();

    impl_block(
        meta,
        bounds,
        struct_,
        quote! {
            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#field_idents as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#field_idents as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        },
    )
}
