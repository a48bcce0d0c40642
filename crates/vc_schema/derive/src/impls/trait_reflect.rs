use proc_macro2::{Ident, TokenStream};
use quote::quote;

use super::{KindBounds, impl_block};
use crate::derive_data::SchemaMeta;

/// Generate implementation code for `Reflect`.
///
/// `variant` names the `ReflectRef`/`ReflectMut` variant of the kind,
/// `is_zero_tokens` is the body of `is_zero`.
pub(super) fn impl_trait_reflect(
    meta: &SchemaMeta,
    bounds: &KindBounds,
    variant: Ident,
    is_zero_tokens: TokenStream,
) -> TokenStream {
    let vc_schema_path = meta.vc_schema_path();
    let reflect_ = crate::path::reflect_(vc_schema_path);
    let typed_ = crate::path::typed_(vc_schema_path);
    let type_info_ = crate::path::type_info_(vc_schema_path);
    let reflect_ref_ = crate::path::reflect_ref_(vc_schema_path);
    let reflect_mut_ = crate::path::reflect_mut_(vc_schema_path);
    let box_ = crate::path::box_(vc_schema_path);

    impl_block(
        meta,
        bounds,
        reflect_.clone(),
        quote! {
            #[inline]
            fn reflect_info(&self) -> &'static #type_info_ {
                <Self as #typed_>::type_info()
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#variant(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#variant(self)
            }

            fn set(
                &mut self,
                value: #box_<dyn #reflect_>,
            ) -> ::core::result::Result<(), #box_<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn is_zero(&self) -> bool {
                #is_zero_tokens
            }

            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_ {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_ {
                self
            }

            #[inline]
            fn pointee(&self) -> ::core::option::Option<&dyn #reflect_> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn pointee_mut(&mut self) -> &mut dyn #reflect_ {
                self
            }
        },
    )
}
