use proc_macro2::Span;
use syn::parse::ParseStream;
use syn::{Attribute, Ident, LitBool, LitStr, Token};

use crate::SCHEMA_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Argument

/// One argument inside `#[schema(...)]`.
enum SchemaArg {
    /// `"alias,options"`, the tag of the default key.
    Tag(LitStr),
    /// `flag`
    Flag(Ident),
    /// `key = "value"`
    Str(Ident, LitStr),
    /// `key = true`
    Bool(Ident, LitBool),
}

impl SchemaArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Tag(input.parse()?));
        }

        let ident: Ident = input.parse()?;
        if !input.peek(Token![=]) {
            return Ok(Self::Flag(ident));
        }

        input.parse::<Token![=]>()?;
        if input.peek(LitBool) {
            Ok(Self::Bool(ident, input.parse()?))
        } else {
            Ok(Self::Str(ident, input.parse()?))
        }
    }

    fn span(&self) -> Span {
        match self {
            Self::Tag(lit) => lit.span(),
            Self::Flag(ident) | Self::Str(ident, _) | Self::Bool(ident, _) => ident.span(),
        }
    }
}

/// Calls `f` for every argument of every `#[schema(...)]` attribute.
fn for_each_arg(
    attrs: &[Attribute],
    mut f: impl FnMut(SchemaArg) -> syn::Result<()>,
) -> syn::Result<()> {
    for attr in attrs {
        if !attr.path().is_ident(SCHEMA_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_args_with(|input: ParseStream| {
            while !input.is_empty() {
                f(SchemaArg::parse(input)?)?;
                if input.is_empty() {
                    break;
                }
                input.parse::<Token![,]>()?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// How a type without fields of its own is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LeafKind {
    /// Decided by the shape of the type.
    Auto,
    /// `#[schema(text)]`: an opaque leaf converted through `FromStr` and
    /// `Display`.
    Text,
    /// `#[schema(opaque)]`: an opaque leaf that needs a registered
    /// converter.
    Opaque,
}

#[derive(Debug)]
pub(crate) struct TypeAttributes {
    pub leaf: LeafKind,
    /// Default is `true`, use `#[schema(typed = false)]` to disable it.
    /// Then users must implement `Typed` themselves.
    pub impl_typed: bool,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self {
            leaf: LeafKind::Auto,
            impl_typed: true,
        };

        for_each_arg(attrs, |arg| {
            match &arg {
                SchemaArg::Flag(ident) if ident == "text" => this.set_leaf(LeafKind::Text, ident),
                SchemaArg::Flag(ident) if ident == "opaque" => {
                    this.set_leaf(LeafKind::Opaque, ident)
                }
                SchemaArg::Bool(ident, value) if ident == "typed" => {
                    this.impl_typed = value.value;
                    Ok(())
                }
                _ => Err(syn::Error::new(
                    arg.span(),
                    "unknown type attribute, expected `text`, `opaque` or `typed = false`",
                )),
            }
        })?;

        Ok(this)
    }

    fn set_leaf(&mut self, leaf: LeafKind, ident: &Ident) -> syn::Result<()> {
        if self.leaf != LeafKind::Auto {
            return Err(syn::Error::new(
                ident.span(),
                "`text` and `opaque` can only be given once",
            ));
        }
        self.leaf = leaf;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    /// `(tag key, tag string)` in declaration order.
    pub tags: Vec<(String, LitStr)>,
    /// `#[schema(embed)]`
    pub embedded: bool,
    /// `#[schema(skip)]`: the field is invisible to the codec.
    pub skip: bool,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for_each_arg(attrs, |arg| match arg {
            SchemaArg::Tag(lit) => this.push_tag(SCHEMA_ATTRIBUTE_NAME.to_owned(), lit),
            SchemaArg::Str(key, lit) => this.push_tag(key.to_string(), lit),
            SchemaArg::Flag(ident) if ident == "embed" => {
                this.embedded = true;
                Ok(())
            }
            SchemaArg::Flag(ident) if ident == "skip" => {
                this.skip = true;
                Ok(())
            }
            other => Err(syn::Error::new(
                other.span(),
                "unknown field attribute, expected a tag string, `key = \"tag\"`, `embed` or `skip`",
            )),
        })?;

        Ok(this)
    }

    fn push_tag(&mut self, key: String, lit: LitStr) -> syn::Result<()> {
        if self.tags.iter().any(|(k, _)| *k == key) {
            return Err(syn::Error::new(
                lit.span(),
                format!("duplicate tag for key `{key}`"),
            ));
        }
        self.tags.push((key, lit));
        Ok(())
    }
}
