use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use super::{KindBounds, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::{LeafKind, SchemaMeta};

/// Implement `Typed` and `Reflect` for an opaque leaf.
///
/// The type must implement `Default` and `PartialEq`, its zero value is
/// `Default::default()`. A `text` leaf must also implement `FromStr` and
/// `Display`.
pub(crate) fn impl_opaque(meta: &SchemaMeta) -> TokenStream {
    let vc_schema_path = meta.vc_schema_path();

    let text = meta.attrs().leaf == LeafKind::Text;
    let self_bounds = if text {
        quote! {
            + ::core::cmp::PartialEq
            + ::core::str::FromStr
            + ::core::fmt::Display
        }
    } else {
        quote!(+ ::core::cmp::PartialEq)
    };

    let bounds = KindBounds {
        active_types: Vec::new(),
        bounds: TokenStream::new(),
        self_bounds,
    };

    // trait: Typed
    let opaque_info_ = crate::path::opaque_info_(vc_schema_path);
    let type_info_ = crate::path::type_info_(vc_schema_path);
    let with_text = if text {
        quote!(.with_text::<Self>())
    } else {
        TokenStream::new()
    };
    let typed_trait_tokens = impl_trait_typed(
        meta,
        &bounds,
        quote! {
            #type_info_::Opaque(#opaque_info_::new::<Self>() #with_text)
        },
    );

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(
        meta,
        &bounds,
        Ident::new("Opaque", Span::call_site()),
        quote!(*self == <Self as ::core::default::Default>::default()),
    );

    quote! {
        #typed_trait_tokens

        #reflect_trait_tokens
    }
}
