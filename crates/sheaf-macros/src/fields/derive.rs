//! Implementation of the `#[derive(Fields)]` macro.
//!
//! This macro generates an implementation of the `FieldAccess` trait and
//! field name constants for building field selectors.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_field_attrs, FieldKind};

/// Main implementation of the Fields derive macro.
pub fn fields_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Fields can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Fields can only be derived for structs",
            ))
        }
    };

    let mut scalar_arms: Vec<TokenStream> = Vec::new();
    let mut nested_arms: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut value_field = None;

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_field_attrs(&field.attrs)?;
        if !attrs.present || attrs.skip {
            continue;
        }

        if attrs.is_value {
            if value_field.is_some() {
                return Err(Error::new(
                    attrs.span,
                    "only one field can be marked #[field(value)]",
                ));
            }
            value_field = Some(field_name.clone());
        }

        let access_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&access_name));

        field_constants.push(quote! {
            /// Field name constant for field selectors.
            pub const #const_name: &'static str = #access_name;
        });

        match attrs.kind {
            FieldKind::Scalar => scalar_arms.push(quote! {
                #access_name => ::sheaf::FieldAccess::value(&self.#field_name),
            }),
            FieldKind::Nested => nested_arms.push(quote! {
                #access_name => ::std::option::Option::Some(&self.#field_name),
            }),
        }
    }

    let value_fn = value_field.map(|field_name| {
        quote! {
            fn value(&self) -> ::sheaf::Value<'_> {
                ::sheaf::FieldAccess::value(&self.#field_name)
            }

            fn is_scalar(&self) -> bool {
                ::sheaf::FieldAccess::is_scalar(&self.#field_name)
            }
        }
    });

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::sheaf::FieldAccess for #struct_name #ty_generics #where_clause {
            #value_fn

            fn field(&self, name: &str) -> ::sheaf::Value<'_> {
                match name {
                    #(#scalar_arms)*
                    _ => ::sheaf::Value::Null,
                }
            }

            fn nested(&self, name: &str) -> ::std::option::Option<&dyn ::sheaf::FieldAccess> {
                match name {
                    #(#nested_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
