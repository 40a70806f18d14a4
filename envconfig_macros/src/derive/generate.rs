//! Code generation for `#[derive(EnvConfig)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use super::parse::{FieldPlan, ParsedField, ParsedInput, is_coercible};

fn option_str(value: Option<&str>) -> TokenStream {
    value.map_or_else(
        || quote! { ::core::option::Option::None },
        |text| quote! { ::core::option::Option::Some(#text) },
    )
}

struct Tags<'a> {
    key: Option<&'a str>,
    default: Option<&'a str>,
    required: Option<&'a str>,
    prefix: Option<&'a str>,
    json_key: Option<&'a str>,
}

impl Tags<'_> {
    fn to_tokens(&self, krate: &TokenStream) -> TokenStream {
        let key = option_str(self.key);
        let default = option_str(self.default);
        let required = option_str(self.required);
        let prefix = option_str(self.prefix);
        let json_key = option_str(self.json_key);
        quote! {
            #krate::FieldTags {
                key: #key,
                default: #default,
                required: #required,
                prefix: #prefix,
                json_key: #json_key,
            }
        }
    }
}

/// Builds the descriptor expression for one field, or `None` if ignored.
fn field_descriptor(field: &ParsedField, krate: &TokenStream) -> Option<TokenStream> {
    let ident = &field.ident;
    let ty = &field.ty;
    let name = ident.to_string();
    let (tags, kind) = match &field.plan {
        FieldPlan::Ignore => return None,
        FieldPlan::Keyed {
            key,
            default,
            required,
            with,
        } => {
            let tags = Tags {
                key: Some(key),
                default: default.as_deref(),
                required: required.as_deref(),
                prefix: None,
                json_key: None,
            };
            let kind = match with {
                Some(decoder) => quote! {
                    #krate::FieldKind::<Self>::Custom {
                        target: ::core::any::type_name::<#ty>(),
                        is_zero: |cfg| {
                            cfg.#ident == <#ty as ::core::default::Default>::default()
                        },
                        decode: |cfg, raw| {
                            cfg.#ident = #decoder(raw)
                                .map_err(::core::convert::Into::<#krate::BoxError>::into)?;
                            ::core::result::Result::Ok(())
                        },
                    }
                },
                None if is_coercible(ty) => quote! {
                    #krate::FieldKind::<Self>::Value(|cfg| &mut cfg.#ident)
                },
                None => quote! {
                    #krate::FieldKind::<Self>::Unsupported(::core::any::type_name::<#ty>())
                },
            };
            (tags, kind)
        }
        FieldPlan::Nested { prefix } => (
            Tags {
                key: None,
                default: None,
                required: None,
                prefix: prefix.as_deref(),
                json_key: None,
            },
            quote! { #krate::FieldKind::<Self>::Nested(|cfg| &mut cfg.#ident) },
        ),
        FieldPlan::Json { key } => (
            Tags {
                key: None,
                default: None,
                required: None,
                prefix: None,
                json_key: Some(key),
            },
            quote! { #krate::FieldKind::<Self>::Json(|cfg| &mut cfg.#ident) },
        ),
    };
    let tags = tags.to_tokens(krate);
    Some(quote! {
        #krate::FieldDescriptor::new(#name, #tags, #kind)
    })
}

/// Generates the `EnvConfig` implementation for the input struct.
pub(crate) fn env_config_impl(
    input: &DeriveInput,
    parsed: &ParsedInput,
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let descriptors = parsed
        .fields
        .iter()
        .filter_map(|field| field_descriptor(field, krate));
    quote! {
        impl #impl_generics #krate::EnvConfig for #ident #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<#krate::FieldDescriptor<Self>> {
                ::std::vec![#(#descriptors),*]
            }
        }
    }
}
