//! Attribute parsing for the Fields derive macro.
//!
//! This module provides parsers for the `#[field]` and `#[field(...)]`
//! attributes used by the `Fields` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// How an annotated field is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Scalar field: `#[field]`
    #[default]
    Scalar,
    /// Child for dotted paths: `#[field(nested)]`
    Nested,
}

/// Field-level attributes from `#[field(...)]`.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    /// Whether the field carries a `#[field]` attribute at all.
    pub present: bool,
    /// How the field is exposed.
    pub kind: FieldKind,
    /// The field is the struct's own scalar view.
    pub is_value: bool,
    /// Skip this field.
    pub skip: bool,
    /// Custom field name (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            present: false,
            kind: FieldKind::Scalar,
            is_value: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr {
            present: true,
            span: input.span(),
            ..FieldAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) if p.is_ident("nested") => attr.kind = FieldKind::Nested,
                Meta::Path(p) if p.is_ident("value") => attr.is_value = true,

                // rename = "custom_name"
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown field attribute. Expected: nested, value, skip, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.is_value && attr.kind == FieldKind::Nested {
            return Err(Error::new(
                attr.span,
                "a nested field cannot also be the value field",
            ));
        }

        Ok(attr)
    }
}

/// Extract the `#[field]` / `#[field(...)]` attribute from a field's attributes.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    for attr in attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        return match &attr.meta {
            Meta::Path(p) => Ok(FieldAttr {
                present: true,
                span: p.span(),
                ..FieldAttr::default()
            }),
            Meta::List(_) => attr.parse_args::<FieldAttr>(),
            Meta::NameValue(nv) => Err(Error::new(
                nv.span(),
                "expected #[field] or #[field(...)]",
            )),
        };
    }
    Ok(FieldAttr::default())
}
