use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Ident, Type};

use super::{KindBounds, impl_block, impl_trait_reflect, impl_trait_typed};
use crate::derive_data::SchemaMeta;

/// Implement `Typed`, `Reflect` and `Scalar` for `struct T(Inner);`.
///
/// The newtype reads and writes the primitive of `Inner`.
pub(crate) fn impl_newtype(meta: &SchemaMeta, inner: &Type) -> TokenStream {
    let vc_schema_path = meta.vc_schema_path();
    let typed_ = crate::path::typed_(vc_schema_path);
    let reflect_ = crate::path::reflect_(vc_schema_path);
    let scalar_ = crate::path::scalar_(vc_schema_path);
    let scalar_kind_ = crate::path::scalar_kind_(vc_schema_path);
    let primitive_ = crate::path::primitive_(vc_schema_path);

    let bounds = KindBounds {
        active_types: vec![inner],
        bounds: quote!(#typed_ + #scalar_),
        self_bounds: TokenStream::new(),
    };

    // trait: Typed
    let scalar_info_ = crate::path::scalar_info_(vc_schema_path);
    let type_info_ = crate::path::type_info_(vc_schema_path);
    let typed_trait_tokens = impl_trait_typed(
        meta,
        &bounds,
        quote! {
            #type_info_::Scalar(#scalar_info_::new::<Self>())
        },
    );

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(
        meta,
        &bounds,
        Ident::new("Scalar", Span::call_site()),
        quote!(#reflect_::is_zero(&self.0)),
    );

    // trait: Scalar
    let scalar_trait_tokens = impl_block(
        meta,
        &bounds,
        scalar_.clone(),
        quote! {
            #[inline]
            fn kind() -> #scalar_kind_
            where
                Self: Sized,
            {
                <#inner as #scalar_>::kind()
            }

            #[inline]
            fn scalar_kind(&self) -> #scalar_kind_ {
                #scalar_::scalar_kind(&self.0)
            }

            #[inline]
            fn primitive(&self) -> #primitive_ {
                #scalar_::primitive(&self.0)
            }

            #[inline]
            fn set_primitive(
                &mut self,
                value: #primitive_,
            ) -> ::core::result::Result<(), #primitive_> {
                #scalar_::set_primitive(&mut self.0, value)
            }
        },
    );

    quote! {
        #typed_trait_tokens

        #reflect_trait_tokens

        #scalar_trait_tokens
    }
}
