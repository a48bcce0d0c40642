use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, GenericParam, Generics, Ident, ImplGenerics, Path, Type,
    TypeGenerics, WhereClause, spanned::Spanned,
};

use super::{FieldAttributes, LeafKind, TypeAttributes};

// -----------------------------------------------------------------------------
// SchemaMeta

/// What every kind of derived type shares.
pub(crate) struct SchemaMeta<'a> {
    vc_schema_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl<'a> SchemaMeta<'a> {
    #[inline]
    pub fn vc_schema_path(&self) -> &Path {
        &self.vc_schema_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// Whether the type has type or const parameters, in which case the type
    /// information lives in a `GenericTypeInfoCell`.
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// Splits the generics for an `impl` block.
    ///
    /// For generic types the where clause is extended with
    /// `T: Send + Sync + 'static` for every type parameter,
    /// `Self: Default + self_bounds`, and `bounds` for every type in
    /// `active_types`.
    pub fn split_generics(
        &self,
        active_types: &[&Type],
        bounds: TokenStream,
        self_bounds: TokenStream,
    ) -> (ImplGenerics<'a>, TypeGenerics<'a>, Option<WhereClause>) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        if !self.impl_with_generic() {
            return (impl_generics, ty_generics, where_clause.cloned());
        }

        let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });

        for param in &self.generics.params {
            if let GenericParam::Type(param) = param {
                let ident = &param.ident;
                where_clause
                    .predicates
                    .push(syn::parse_quote!(#ident: ::core::marker::Send + ::core::marker::Sync + 'static));
            }
        }

        let ident = self.ident;
        where_clause
            .predicates
            .push(syn::parse_quote!(#ident #ty_generics: ::core::default::Default #self_bounds));

        for ty in active_types {
            where_clause.predicates.push(syn::parse_quote!(#ty: #bounds));
        }

        (impl_generics, ty_generics, Some(where_clause))
    }
}

// -----------------------------------------------------------------------------
// StructField

pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    /// The `FieldInfo` expression of this field.
    ///
    /// ```ignore
    /// FieldInfo::new::<Ty>("name").with_tags(&[("schema", "..."), ...]).with_embedded()
    /// ```
    pub fn to_info_tokens(&self, vc_schema_path: &Path) -> TokenStream {
        let field_info_ = crate::path::field_info_(vc_schema_path);
        let ty = self.ty;
        let name = self.ident.to_string();

        let with_tags = if self.attrs.tags.is_empty() {
            TokenStream::new()
        } else {
            let tags = self.attrs.tags.iter().map(|(key, lit)| quote!((#key, #lit)));
            quote!(.with_tags(&[#(#tags),*]))
        };

        let with_embedded = if self.attrs.embedded {
            quote!(.with_embedded())
        } else {
            TokenStream::new()
        };

        quote! {
            #field_info_::new::<#ty>(#name) #with_tags #with_embedded
        }
    }
}

// -----------------------------------------------------------------------------
// SchemaDerive

/// The parsed input of `#[derive(Schema)]`.
pub(crate) enum SchemaDerive<'a> {
    /// A struct with named fields.
    Struct {
        meta: SchemaMeta<'a>,
        fields: Vec<StructField<'a>>,
    },
    /// A tuple struct with one field, exposed as the scalar it wraps.
    Newtype { meta: SchemaMeta<'a>, inner: &'a Type },
    /// A leaf marked with `#[schema(text)]` or `#[schema(opaque)]`.
    Opaque { meta: SchemaMeta<'a> },
}

impl<'a> SchemaDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse(&input.attrs)?;

        if let Some(GenericParam::Lifetime(param)) = input
            .generics
            .params
            .iter()
            .find(|param| matches!(param, GenericParam::Lifetime(_)))
        {
            return Err(syn::Error::new(
                param.span(),
                "`Schema` types must be 'static, lifetime parameters are not supported",
            ));
        }

        let leaf = attrs.leaf;
        let meta = SchemaMeta {
            vc_schema_path: crate::path::vc_schema(),
            attrs,
            ident: &input.ident,
            generics: &input.generics,
        };

        if leaf != LeafKind::Auto {
            return Ok(Self::Opaque { meta });
        }

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "enums need `#[schema(text)]` or `#[schema(opaque)]`",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "unions are not supported",
                ));
            }
        };

        match &data.fields {
            Fields::Named(named) => {
                let fields = named
                    .named
                    .iter()
                    .map(|field| {
                        let attrs = FieldAttributes::parse(&field.attrs)?;
                        let ident = field
                            .ident
                            .as_ref()
                            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
                        Ok(StructField {
                            ident,
                            ty: &field.ty,
                            attrs,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;

                Ok(Self::Struct {
                    meta,
                    fields: fields.into_iter().filter(|field| !field.attrs.skip).collect(),
                })
            }
            Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
                let field = &unnamed.unnamed[0];
                let attrs = FieldAttributes::parse(&field.attrs)?;
                if !attrs.tags.is_empty() || attrs.embedded || attrs.skip {
                    return Err(syn::Error::new(
                        field.span(),
                        "the field of a newtype takes no attributes",
                    ));
                }
                Ok(Self::Newtype {
                    meta,
                    inner: &field.ty,
                })
            }
            Fields::Unnamed(unnamed) => Err(syn::Error::new(
                unnamed.span(),
                "tuple structs need exactly one field",
            )),
            Fields::Unit => Err(syn::Error::new(
                Span::call_site(),
                "unit structs need `#[schema(opaque)]`",
            )),
        }
    }
}
