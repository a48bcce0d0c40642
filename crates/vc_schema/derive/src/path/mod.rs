//! Paths of the `vc_schema` items referred to by generated code.
//!
//! The only special feature is the path of `vc_schema` itself,
//! see [`vc_schema`].

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_schema` crate.
///
/// 1. For `vc_schema` itself and crates that depend on it, `::vc_schema`.
/// 2. For crates that depend on `vc_form`, `::vc_form::schema`.
/// 3. For other situations, `::vc_schema`, which may be incorrect.
///
/// The call reads the caller's `Cargo.toml`, so the result is passed down
/// instead of being queried again.
pub(crate) fn vc_schema() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_schema"))
}

// -----------------------------------------------------------------------------
// Items

macro_rules! item_paths {
    ($($name:ident => $($segment:ident)::+;)*) => {$(
        #[inline(always)]
        pub(crate) fn $name(vc_schema_path: &syn::Path) -> TokenStream {
            quote! { #vc_schema_path::$($segment)::+ }
        }
    )*};
}

item_paths! {
    reflect_ => Reflect;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    field_info_ => info::FieldInfo;
    scalar_info_ => info::ScalarInfo;
    opaque_info_ => info::OpaqueInfo;
    reflect_ref_ => ops::ReflectRef;
    reflect_mut_ => ops::ReflectMut;
    struct_ => ops::Struct;
    scalar_ => ops::Scalar;
    scalar_kind_ => ops::ScalarKind;
    primitive_ => ops::Primitive;
    non_generic_type_info_cell_ => impls::NonGenericTypeInfoCell;
    generic_type_info_cell_ => impls::GenericTypeInfoCell;
    box_ => __macro_exports::Box;
}
